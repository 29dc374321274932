//! FFT wrapper and averaged power spectrum for waveform display

use crate::{buffer::{Complex, Sample}, CoreError, Result};
use rustfft::{num_complex::Complex64, FftPlanner};
use std::sync::Arc;

/// Forward FFT of a fixed power-of-two size
pub struct FftProcessor {
    size: usize,
    fft: Arc<dyn rustfft::Fft<f64>>,
}

impl FftProcessor {
    /// Create a new FFT processor
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(CoreError::FftError {
                msg: format!("FFT size must be a power of 2, got {}", size),
            });
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        Ok(Self { size, fft })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT
    pub fn fft(&self, input: &[Complex]) -> Result<Vec<Complex>> {
        if input.len() != self.size {
            return Err(CoreError::BufferSizeMismatch {
                expected: self.size,
                actual: input.len(),
            });
        }

        let mut buffer: Vec<Complex64> = input
            .iter()
            .map(|c| Complex64::new(c.real, c.imag))
            .collect();

        self.fft.process(&mut buffer);

        Ok(buffer.iter().map(|c| Complex::new(c.re, c.im)).collect())
    }
}

/// Hann window of length `n`
fn hann(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos()))
        .collect()
}

/// Averaged periodogram of a waveform.
///
/// The waveform is cut into non-overlapping Hann-windowed segments of
/// `size` samples; the squared FFT magnitudes are averaged and returned in
/// FFT bin order (DC first, `size` bins). A trailing partial segment is
/// zero padded. An empty waveform gives all-zero bins.
pub fn power_spectrum<T: Sample>(samples: &[T], size: usize) -> Result<Vec<f64>> {
    let processor = FftProcessor::new(size)?;
    let window = hann(size);
    let window_energy: f64 = window.iter().map(|w| w * w).sum();

    let mut accum = vec![0.0; size];
    let mut segments = 0usize;

    for chunk in samples.chunks(size) {
        let mut segment: Vec<Complex> = chunk
            .iter()
            .zip(window.iter())
            .map(|(s, w)| s.to_complex() * *w)
            .collect();
        segment.resize(size, Complex::default());

        let spectrum = processor.fft(&segment)?;
        for (acc, bin) in accum.iter_mut().zip(spectrum.iter()) {
            *acc += bin.norm_sqr();
        }
        segments += 1;
    }

    if segments > 0 {
        let scale = 1.0 / (segments as f64 * window_energy);
        for bin in &mut accum {
            *bin *= scale;
        }
    }

    Ok(accum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_processor_invalid_size() {
        assert!(FftProcessor::new(1000).is_err());
        assert!(FftProcessor::new(0).is_err());
    }

    #[test]
    fn test_fft_impulse_is_flat() {
        let processor = FftProcessor::new(8).unwrap();
        let mut input = vec![Complex::default(); 8];
        input[0] = Complex::new(1.0, 0.0);

        let output = processor.fft(&input).unwrap();
        for bin in output {
            assert!((bin.real - 1.0).abs() < 1e-12);
            assert!(bin.imag.abs() < 1e-12);
        }
    }

    #[test]
    fn test_fft_size_mismatch() {
        let processor = FftProcessor::new(8).unwrap();
        let result = processor.fft(&[Complex::default(); 4]);
        assert!(matches!(
            result,
            Err(CoreError::BufferSizeMismatch { expected: 8, actual: 4 })
        ));
    }

    #[test]
    fn test_power_spectrum_peaks_at_tone() {
        let size = 64;
        let bin = 8;
        let tone: Vec<f64> = (0..size * 4)
            .map(|n| (2.0 * std::f64::consts::PI * bin as f64 * n as f64 / size as f64).cos())
            .collect();

        let spectrum = power_spectrum(&tone, size).unwrap();
        assert_eq!(spectrum.len(), size);

        let peak = spectrum[..size / 2]
            .iter()
            .enumerate()
            .fold((0, 0.0), |best, (i, &p)| if p > best.1 { (i, p) } else { best });
        assert_eq!(peak.0, bin);
    }

    #[test]
    fn test_power_spectrum_empty_input() {
        let spectrum = power_spectrum::<f64>(&[], 16).unwrap();
        assert!(spectrum.iter().all(|&p| p == 0.0));
    }
}
