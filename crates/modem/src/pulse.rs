//! Pulse shaping and matched filtering with a shared RRC kernel

use crate::{ModemError, Result};
use linksim_core::buffer::Sample;
use linksim_core::filter::convolve_same;

/// Upsample symbols by `sps` (zero stuffing) and convolve with `kernel`.
///
/// Symbol `k` lands on sample `k * sps`; the result has length
/// `symbols.len() * sps`.
pub fn shape(symbols: &[f64], kernel: &[f64], sps: usize) -> Result<Vec<f64>> {
    if sps == 0 {
        return Err(ModemError::InvalidArgument {
            msg: "samples per symbol must be greater than 0".to_string(),
        });
    }

    let mut upsampled = vec![0.0; symbols.len() * sps];
    for (k, &symbol) in symbols.iter().enumerate() {
        upsampled[k * sps] = symbol;
    }

    Ok(convolve_same(&upsampled, kernel))
}

/// Receive-side filter matched to the transmit pulse
pub fn matched_filter<T: Sample>(waveform: &[T], kernel: &[f64]) -> Vec<T> {
    convolve_same(waveform, kernel)
}
