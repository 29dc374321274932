//! Coherent cosine carrier mixer
//!
//! Up-conversion and down-conversion are the same operation: the waveform
//! is multiplied by `cos(2*pi*fc*t/sps + phase)`. The receiver is assumed
//! to know the transmitter's carrier phase exactly, so both ends must be
//! given the same `phase` (see `LinkParams::carrier_phase`). No carrier
//! phase or frequency recovery is performed.

use linksim_core::buffer::Sample;
use std::f64::consts::PI;

/// Multiply a waveform by a cosine carrier.
///
/// `fc` is in cycles per symbol, so the carrier advances `2*pi*fc/sps`
/// radians per sample.
pub fn mix<T: Sample>(waveform: &[T], fc: f64, sps: usize, phase: f64) -> Vec<T> {
    let omega = 2.0 * PI * fc / sps as f64;
    waveform
        .iter()
        .enumerate()
        .map(|(t, &sample)| sample * (omega * t as f64 + phase).cos())
        .collect()
}

/// Transmit-side up-conversion
pub fn modulate<T: Sample>(baseband: &[T], fc: f64, sps: usize, phase: f64) -> Vec<T> {
    mix(baseband, fc, sps, phase)
}

/// Receive-side coherent down-conversion
pub fn demodulate<T: Sample>(passband: &[T], fc: f64, sps: usize, phase: f64) -> Vec<T> {
    mix(passband, fc, sps, phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linksim_core::buffer::Complex;

    #[test]
    fn test_mix_matches_carrier() {
        let out = mix(&[1.0; 8], 2.0, 16, 0.0);
        let expected = [1.0, 0.70710678, 0.0, -0.70710678, -1.0, -0.70710678, 0.0, 0.70710678];
        for (o, e) in out.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mix_preserves_length() {
        let input = vec![Complex::new(1.0, 1.0); 37];
        assert_eq!(mix(&input, 2.0, 16, 0.3).len(), 37);
    }

    #[test]
    fn test_coherent_round_trip_has_half_gain_at_dc() {
        // cos^2 averages to 1/2 over whole carrier periods
        let baseband = vec![1.0; 64];
        let passband = modulate(&baseband, 2.0, 16, 0.0);
        let recovered = demodulate(&passband, 2.0, 16, 0.0);
        let mean = recovered.iter().sum::<f64>() / recovered.len() as f64;
        assert!((mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_quadrature_phase_cancels() {
        let baseband = vec![1.0; 64];
        let passband = modulate(&baseband, 2.0, 16, 0.0);
        let recovered = demodulate(&passband, 2.0, 16, PI / 2.0);
        let mean = recovered.iter().sum::<f64>() / recovered.len() as f64;
        assert!(mean.abs() < 1e-9);
    }
}
