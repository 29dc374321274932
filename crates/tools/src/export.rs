//! Writing simulation results to disk

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use linksim_core::buffer::Sample;

use crate::link::SimulationReport;

/// Write a full report as pretty-printed JSON
pub fn write_report_json(report: &SimulationReport, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write report: {:?}", path))?;

    info!("Wrote report for {} bits to {:?}", report.original_bits.len(), path);
    Ok(())
}

/// Write the in-phase part of a waveform as 16-bit mono PCM.
///
/// Samples are scaled by the waveform's peak so the loudest sample sits at
/// full scale. An all-zero waveform is written as silence.
pub fn write_wav<T: Sample>(samples: &[T], path: &Path, sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        bail!("WAV sample rate must be positive");
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    let peak = samples
        .iter()
        .map(|s| s.in_phase().abs())
        .fold(0.0f64, f64::max);
    let scale = if peak > 0.0 { 32767.0 / peak } else { 0.0 };

    for sample in samples {
        let amplitude = (sample.in_phase() * scale).clamp(-32767.0, 32767.0) as i16;
        writer.write_sample(amplitude)?;
    }

    writer.finalize()?;
    info!("Wrote {} samples to {:?}", samples.len(), path);
    Ok(())
}
