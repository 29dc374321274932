//! Open-loop, block-averaged symbol timing recovery

use crate::{ModemError, Result};
use linksim_core::buffer::Sample;
use serde::{Deserialize, Serialize};

/// Symbol periods averaged by the default estimator
pub const DEFAULT_WINDOW_BLOCKS: usize = 10;

/// Result of a timing estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEstimate<T> {
    /// Chosen sampling phase, always in `0..sps`
    pub offset: usize,
    /// Phase the decimation was aligned to: equal to `offset`, or
    /// `offset - sps` when a centered estimator picked a late phase
    pub phase: isize,
    /// One sample per symbol, aligned to `phase`
    pub samples: Vec<T>,
    /// Mean absolute amplitude for each candidate phase
    pub metric: Vec<f64>,
    /// Number of symbol-length blocks the metric was averaged over
    pub blocks_used: usize,
}

/// Block-averaged timing estimator.
///
/// The first `window_blocks * sps` samples are split into blocks of one
/// symbol period. For every phase `0..sps` the mean `|x|` across blocks is
/// computed and the first phase with the largest mean wins. The estimate
/// is static: timing drift is not tracked.
///
/// By default the waveform is decimated from `offset` onwards, so a phase
/// of `sps - 1` drops the first symbol. A centered estimator reads phases
/// above `sps / 2` as early samples of the following symbol instant
/// (`offset - sps`) and takes symbol 0 from the first sample instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRecovery {
    window_blocks: usize,
    strict: bool,
    centered: bool,
}

impl Default for TimingRecovery {
    fn default() -> Self {
        Self {
            window_blocks: DEFAULT_WINDOW_BLOCKS,
            strict: false,
            centered: false,
        }
    }
}

impl TimingRecovery {
    /// Estimator averaging over `window_blocks` symbol periods
    pub fn new(window_blocks: usize) -> Result<Self> {
        if window_blocks == 0 {
            return Err(ModemError::InvalidArgument {
                msg: "timing window must cover at least one symbol".to_string(),
            });
        }
        Ok(Self {
            window_blocks,
            ..Self::default()
        })
    }

    /// Require the full window; shorter inputs fail with `InsufficientData`
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Align decimation to the nearest symbol instant (see type docs)
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    pub fn window_blocks(&self) -> usize {
        self.window_blocks
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Estimate the sampling phase and decimate to one sample per symbol.
    ///
    /// A waveform shorter than the window but holding at least one whole
    /// symbol period is estimated over the whole blocks available, unless
    /// the estimator is strict.
    pub fn recover<T: Sample>(&self, waveform: &[T], sps: usize) -> Result<TimingEstimate<T>> {
        if sps == 0 {
            return Err(ModemError::InvalidArgument {
                msg: "samples per symbol must be greater than 0".to_string(),
            });
        }

        let full_window = self.window_blocks * sps;
        let required = if self.strict { full_window } else { sps };
        if waveform.len() < required {
            return Err(ModemError::InsufficientData {
                required,
                actual: waveform.len(),
            });
        }

        let blocks_used = (waveform.len() / sps).min(self.window_blocks);
        if blocks_used < self.window_blocks {
            tracing::warn!(
                "Timing window shortened to {} of {} symbol periods",
                blocks_used,
                self.window_blocks
            );
        }

        let mut metric = vec![0.0; sps];
        for block in waveform[..blocks_used * sps].chunks_exact(sps) {
            for (acc, sample) in metric.iter_mut().zip(block.iter()) {
                *acc += sample.amplitude();
            }
        }
        for m in &mut metric {
            *m /= blocks_used as f64;
        }

        let mut offset = 0;
        for (phase, &m) in metric.iter().enumerate() {
            if m > metric[offset] {
                offset = phase;
            }
        }

        let phase = if self.centered && 2 * offset > sps {
            offset as isize - sps as isize
        } else {
            offset as isize
        };

        let samples: Vec<T> = if phase < 0 {
            let len = waveform.len() as isize;
            (0..waveform.len().div_ceil(sps) as isize)
                .map(|k| k * sps as isize + phase)
                .take_while(|&i| i < len)
                .map(|i| waveform[i.max(0) as usize])
                .collect()
        } else {
            waveform[offset..].iter().step_by(sps).copied().collect()
        };

        tracing::debug!(
            "Timing offset {} of {} (phase {}, {} symbols recovered)",
            offset,
            sps,
            phase,
            samples.len()
        );

        Ok(TimingEstimate {
            offset,
            phase,
            samples,
            metric,
            blocks_used,
        })
    }
}

/// Recover symbol timing with the default ten-symbol window
pub fn recover_timing<T: Sample>(waveform: &[T], sps: usize) -> Result<TimingEstimate<T>> {
    TimingRecovery::default().recover(waveform, sps)
}
