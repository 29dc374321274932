//! Sample types and waveform containers

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, Mul, Sub};

/// Complex number representation for IQ data
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    pub fn magnitude(&self) -> f64 {
        (self.real * self.real + self.imag * self.imag).sqrt()
    }

    pub fn norm_sqr(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    pub fn phase(&self) -> f64 {
        self.imag.atan2(self.real)
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Complex::new(real, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        self.real += rhs.real;
        self.imag += rhs.imag;
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Self::Output {
        Complex::new(self.real * rhs, self.imag * rhs)
    }
}

/// A sample that can flow through the real-valued filters and mixers.
///
/// Implemented for `f64` (noise-free baseband and passband) and `Complex`
/// (everything after the channel).
pub trait Sample: Copy + Default + Add<Output = Self> + Mul<f64, Output = Self> {
    /// Instantaneous power, `|x|^2`
    fn power(&self) -> f64;

    /// Absolute amplitude, `|x|`
    fn amplitude(&self) -> f64;

    /// In-phase component used for hard decisions
    fn in_phase(&self) -> f64;

    /// Lift to a complex sample
    fn to_complex(&self) -> Complex;
}

impl Sample for f64 {
    fn power(&self) -> f64 {
        self * self
    }

    fn amplitude(&self) -> f64 {
        self.abs()
    }

    fn in_phase(&self) -> f64 {
        *self
    }

    fn to_complex(&self) -> Complex {
        Complex::from(*self)
    }
}

impl Sample for Complex {
    fn power(&self) -> f64 {
        self.norm_sqr()
    }

    fn amplitude(&self) -> f64 {
        self.magnitude()
    }

    fn in_phase(&self) -> f64 {
        self.real
    }

    fn to_complex(&self) -> Complex {
        *self
    }
}

/// Mean of `|x|^2` over a slice, 0 for an empty slice
pub fn mean_power<T: Sample>(samples: &[T]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(Sample::power).sum::<f64>() / samples.len() as f64
}

/// Sampled waveform tagged with its oversampling factor.
///
/// The sample rate is implicit: `samples_per_symbol` times the symbol rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform<T> {
    samples: Vec<T>,
    samples_per_symbol: usize,
}

impl<T> Waveform<T> {
    /// Wrap existing samples
    pub fn from_samples(samples: Vec<T>, samples_per_symbol: usize) -> Result<Self> {
        if samples_per_symbol == 0 {
            return Err(CoreError::InvalidArgument {
                msg: "samples per symbol must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            samples,
            samples_per_symbol,
        })
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Duration in symbol periods
    pub fn symbol_periods(&self) -> f64 {
        self.samples.len() as f64 / self.samples_per_symbol as f64
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }
}

impl<T> Index<usize> for Waveform<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

/// Real-valued waveform (shaped baseband, passband before the channel)
pub type RealWaveform = Waveform<f64>;

/// Complex-valued waveform (everything after noise injection)
pub type ComplexWaveform = Waveform<Complex>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_creation() {
        let waveform = Waveform::from_samples(vec![0.0f64; 64], 16).unwrap();
        assert_eq!(waveform.len(), 64);
        assert_eq!(waveform.samples_per_symbol(), 16);
        assert_eq!(waveform.symbol_periods(), 4.0);
    }

    #[test]
    fn test_invalid_samples_per_symbol() {
        let result = Waveform::from_samples(vec![1.0f64], 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_complex_operations() {
        let c = Complex::new(3.0, 4.0);
        assert_eq!(c.magnitude(), 5.0);
        assert!((c.phase() - 0.9272952180016122).abs() < 1e-10);

        let sum = c + Complex::new(1.0, -1.0);
        assert_eq!(sum, Complex::new(4.0, 3.0));
        assert_eq!(c * 2.0, Complex::new(6.0, 8.0));
    }

    #[test]
    fn test_sample_trait() {
        assert_eq!((-2.0f64).amplitude(), 2.0);
        assert_eq!((-2.0f64).power(), 4.0);
        assert_eq!(Complex::new(3.0, 4.0).power(), 25.0);
        assert_eq!(Complex::new(-0.5, 4.0).in_phase(), -0.5);
    }

    #[test]
    fn test_mean_power() {
        assert_eq!(mean_power::<f64>(&[]), 0.0);
        assert_eq!(mean_power(&[1.0, -1.0, 1.0, -1.0]), 1.0);
        assert_eq!(mean_power(&[Complex::new(0.0, 2.0)]), 4.0);
    }
}
