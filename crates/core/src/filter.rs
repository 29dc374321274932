//! Root-raised-cosine filter design and centered FIR convolution

use crate::buffer::Sample;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

/// Tolerance used to detect the `|t| = 1/(4*beta)` singularity
const SINGULARITY_EPS: f64 = 1e-9;

/// Validated root-raised-cosine design parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RrcParams {
    sps: usize,
    beta: f64,
    span: usize,
}

impl RrcParams {
    /// Create a new parameter set
    ///
    /// `sps` and `span` must be positive, `beta` must lie in `(0, 1]` and
    /// `span * sps` must be even so the kernel has a center tap.
    pub fn new(sps: usize, beta: f64, span: usize) -> Result<Self> {
        if sps == 0 {
            return Err(CoreError::InvalidArgument {
                msg: "samples per symbol must be greater than 0".to_string(),
            });
        }

        if span == 0 {
            return Err(CoreError::InvalidArgument {
                msg: "filter span must be greater than 0".to_string(),
            });
        }

        if !(beta > 0.0 && beta <= 1.0) {
            return Err(CoreError::InvalidArgument {
                msg: format!("Invalid rolloff factor: {}", beta),
            });
        }

        if (span * sps) % 2 != 0 {
            return Err(CoreError::InvalidArgument {
                msg: format!("span * sps must be even, got {} * {}", span, sps),
            });
        }

        Ok(Self { sps, beta, span })
    }

    pub fn sps(&self) -> usize {
        self.sps
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Number of taps, `span * sps + 1`
    pub fn num_taps(&self) -> usize {
        self.span * self.sps + 1
    }
}

/// Energy-normalized root-raised-cosine taps.
///
/// Tap `i` sits at normalized time `t_i = (i - span*sps/2) / sps`. The two
/// singular points of the closed form (`t = 0` and `|t| = 1/(4*beta)`) use
/// their limits.
///
/// Precondition: `sps > 0`, `0 < beta <= 1`. Use [`RrcParams::new`] to get
/// a checked parameter set; this function does not validate.
pub fn rrc_taps(sps: usize, beta: f64, span: usize) -> Vec<f64> {
    debug_assert!(sps > 0 && beta > 0.0 && beta <= 1.0);

    let half = (span * sps / 2) as i64;
    let sps_f = sps as f64;
    let singular_t = 1.0 / (4.0 * beta);

    let mut taps: Vec<f64> = (0..=(span * sps) as i64)
        .map(|i| {
            let offset = i - half;
            if offset == 0 {
                return 1.0 - beta + 4.0 * beta / PI;
            }

            let t = offset as f64 / sps_f;
            if (t.abs() - singular_t).abs() < SINGULARITY_EPS {
                let arg = PI / (4.0 * beta);
                return (beta / SQRT_2)
                    * ((1.0 + 2.0 / PI) * arg.sin() + (1.0 - 2.0 / PI) * arg.cos());
            }

            let numerator = (PI * t * (1.0 - beta)).sin()
                + 4.0 * beta * t * (PI * t * (1.0 + beta)).cos();
            let denominator = PI * t * (1.0 - (4.0 * beta * t).powi(2));
            numerator / denominator
        })
        .collect();

    let norm = taps.iter().map(|h| h * h).sum::<f64>().sqrt();
    if norm > 0.0 {
        for tap in &mut taps {
            *tap /= norm;
        }
    }

    taps
}

/// Immutable RRC kernel shared by the pulse shaper and the matched filter
#[derive(Debug, Clone, PartialEq)]
pub struct RrcFilter {
    params: RrcParams,
    taps: Vec<f64>,
}

impl RrcFilter {
    /// Synthesize the kernel for a validated parameter set
    pub fn design(params: RrcParams) -> Self {
        let taps = rrc_taps(params.sps, params.beta, params.span);
        tracing::debug!(
            "Designed RRC filter: sps={} beta={} span={} taps={}",
            params.sps,
            params.beta,
            params.span,
            taps.len()
        );
        Self { params, taps }
    }

    pub fn params(&self) -> &RrcParams {
        &self.params
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Sum of squared taps (1 up to rounding)
    pub fn energy(&self) -> f64 {
        self.taps.iter().map(|h| h * h).sum()
    }

    /// Filter a waveform with centered, same-length convolution
    pub fn apply<T: Sample>(&self, input: &[T]) -> Vec<T> {
        convolve_same(input, &self.taps)
    }
}

/// Same-length convolution with the kernel centered on each output sample.
///
/// `output[n] = sum_j input[j] * kernel[n - j + (L - 1) / 2]`, with terms
/// outside either sequence treated as zero. The output always has the
/// length of `input`.
pub fn convolve_same<T: Sample>(input: &[T], kernel: &[f64]) -> Vec<T> {
    if input.is_empty() || kernel.is_empty() {
        return vec![T::default(); input.len()];
    }

    let center = (kernel.len() - 1) / 2;
    let last = input.len() - 1;

    (0..input.len())
        .map(|n| {
            let hi = (n + center).min(last);
            let lo = (n + center + 1).saturating_sub(kernel.len());
            let mut acc = T::default();
            for j in lo..=hi {
                acc = acc + input[j] * kernel[n + center - j];
            }
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Complex;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_rrc_params_validation() {
        assert!(RrcParams::new(16, 0.35, 32).is_ok());
        assert!(RrcParams::new(0, 0.35, 32).is_err());
        assert!(RrcParams::new(16, 0.35, 0).is_err());
        assert!(RrcParams::new(16, 0.0, 32).is_err());
        assert!(RrcParams::new(16, 1.5, 32).is_err());
        assert!(RrcParams::new(16, f64::NAN, 32).is_err());
        assert!(RrcParams::new(3, 0.35, 1).is_err());
    }

    #[test]
    fn test_rrc_length_and_energy() {
        let filter = RrcFilter::design(RrcParams::new(16, 0.35, 32).unwrap());
        assert_eq!(filter.len(), 513);
        assert_eq!(filter.len() % 2, 1);
        assert!((filter.energy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rrc_symmetric_with_peak_at_center() {
        let filter = RrcFilter::design(RrcParams::new(8, 0.5, 6).unwrap());
        let taps = filter.taps();
        let center = taps.len() / 2;
        for i in 0..center {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-12);
            assert!(taps[i] < taps[center]);
        }
    }

    #[test]
    fn test_rrc_singular_point_is_finite() {
        // beta = 0.25 puts |t| = 1 exactly on a tap
        let taps = rrc_taps(4, 0.25, 8);
        assert!(taps.iter().all(|h| h.is_finite()));
        assert!(taps[16 + 4].abs() > 0.0);
    }

    #[quickcheck]
    fn prop_rrc_unit_energy(sps: u8, beta_pct: u8, span: u8) -> bool {
        let sps = (sps % 16) as usize + 1;
        let span = ((span % 8) as usize + 1) * 2;
        let beta = (beta_pct % 100) as f64 / 100.0 + 0.01;
        let params = RrcParams::new(sps, beta, span).unwrap();
        let filter = RrcFilter::design(params);
        filter.len() == span * sps + 1 && (filter.energy() - 1.0).abs() < 1e-9
    }

    #[test]
    fn test_convolve_same_matches_reference() {
        // Centered reference: [1, 2, 3, 4] * [0.25, 0.5, 0.25]
        let out = convolve_same(&[1.0, 2.0, 3.0, 4.0], &[0.25, 0.5, 0.25]);
        let expected = [1.0, 2.0, 3.0, 2.75];
        for (o, e) in out.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_convolve_same_kernel_longer_than_input() {
        let kernel = [0.0, 0.0, 1.0, 0.0, 0.0];
        let out = convolve_same(&[1.0, -2.0], &kernel);
        assert_eq!(out, vec![1.0, -2.0]);
    }

    #[test]
    fn test_convolve_same_complex() {
        let input = vec![Complex::new(1.0, -1.0), Complex::new(0.0, 2.0)];
        let out = convolve_same(&input, &[1.0]);
        assert_eq!(out, input);
    }

    #[test]
    fn test_convolve_same_empty() {
        assert!(convolve_same::<f64>(&[], &[1.0, 2.0, 1.0]).is_empty());
    }
}
