//! Seeded random bit source

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator used for reproducible simulation runs
pub type SimRng = ChaCha8Rng;

/// Create a generator from a 64-bit seed
pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw `n` independent, equiprobable bits
pub fn generate_bits<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<u8> {
    (0..n).map(|_| rng.gen_range(0..=1u8)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_generate_bits_length_and_values() {
        let mut rng = seeded_rng(42);
        let bits = generate_bits(1000, &mut rng);
        assert_eq!(bits.len(), 1000);
        assert!(bits.iter().all(|&b| b <= 1));

        let ones = bits.iter().filter(|&&b| b == 1).count();
        assert!(ones > 400 && ones < 600, "ones = {}", ones);
    }

    #[test]
    fn test_generate_bits_deterministic() {
        let a = generate_bits(64, &mut seeded_rng(7));
        let b = generate_bits(64, &mut seeded_rng(7));
        let c = generate_bits(64, &mut seeded_rng(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_zero_bits() {
        assert!(generate_bits(0, &mut seeded_rng(1)).is_empty());
    }

    #[quickcheck]
    fn prop_bits_are_binary(n: u16, seed: u64) -> bool {
        let bits = generate_bits(n as usize, &mut seeded_rng(seed));
        bits.len() == n as usize && bits.iter().all(|&b| b <= 1)
    }
}
