//! Additive white Gaussian noise channel

use crate::{ChannelError, Result};
use linksim_core::buffer::{mean_power, Complex, Sample};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Add complex AWGN at `snr_db` relative to the waveform's mean power.
///
/// With `P = mean(|x|^2)` and `N = P / 10^(snr_db/10)`, each sample gets
/// independent real and imaginary Gaussian components of variance `N/2`.
/// `snr_db = +inf` adds no noise. An empty waveform yields an empty one.
pub fn add_awgn<T, R>(waveform: &[T], snr_db: f64, rng: &mut R) -> Result<Vec<Complex>>
where
    T: Sample,
    R: Rng + ?Sized,
{
    if snr_db.is_nan() {
        return Err(ChannelError::InvalidArgument {
            msg: "SNR must be a number".to_string(),
        });
    }

    if waveform.is_empty() {
        return Ok(Vec::new());
    }

    let signal_power = mean_power(waveform);
    let snr_linear = 10f64.powf(snr_db / 10.0);
    let noise_power = signal_power / snr_linear;
    if !noise_power.is_finite() {
        return Err(ChannelError::InvalidArgument {
            msg: format!("SNR of {} dB gives unbounded noise power", snr_db),
        });
    }

    let normal = Normal::new(0.0, (noise_power / 2.0).sqrt()).map_err(|e| {
        ChannelError::InvalidArgument {
            msg: format!("Invalid noise distribution: {}", e),
        }
    })?;

    tracing::debug!(
        "AWGN: signal power {:.6}, SNR {} dB, noise power {:.6}",
        signal_power,
        snr_db,
        noise_power
    );

    Ok(waveform
        .iter()
        .map(|s| s.to_complex() + Complex::new(normal.sample(rng), normal.sample(rng)))
        .collect())
}

/// Pass a waveform through an AWGN channel
pub fn transmit_through_channel<T, R>(waveform: &[T], snr_db: f64, rng: &mut R) -> Result<Vec<Complex>>
where
    T: Sample,
    R: Rng + ?Sized,
{
    add_awgn(waveform, snr_db, rng)
}

/// Channel impairment model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ChannelModel {
    /// Perfect channel (no impairments)
    Ideal,
    /// Additive white Gaussian noise at the given SNR in dB
    Awgn { snr_db: f64 },
}

impl Default for ChannelModel {
    fn default() -> Self {
        ChannelModel::Awgn { snr_db: 10.0 }
    }
}

/// Stateless channel: every call draws fresh noise from the caller's RNG
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Channel {
    model: ChannelModel,
}

impl Channel {
    pub fn new(model: ChannelModel) -> Self {
        Self { model }
    }

    pub fn ideal() -> Self {
        Self::new(ChannelModel::Ideal)
    }

    pub fn awgn(snr_db: f64) -> Self {
        Self::new(ChannelModel::Awgn { snr_db })
    }

    pub fn model(&self) -> ChannelModel {
        self.model
    }

    /// Apply the channel to a waveform
    pub fn transmit<T, R>(&self, waveform: &[T], rng: &mut R) -> Result<Vec<Complex>>
    where
        T: Sample,
        R: Rng + ?Sized,
    {
        match self.model {
            ChannelModel::Ideal => Ok(waveform.iter().map(Sample::to_complex).collect()),
            ChannelModel::Awgn { snr_db } => add_awgn(waveform, snr_db, rng),
        }
    }
}
