//! Configuration management for linksim tools

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use linksim_channel::prelude::ChannelModel;
use linksim_modem::prelude::{LineCode, LinkParams};

use crate::link::SimulationRequest;
use crate::sweep::SnrRange;

/// Complete simulation configuration, as stored in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    /// Symbol rate used to stamp exported WAV files
    pub symbol_rate: u32,
    pub link: LinkParams,
    pub request: SimulationRequest,
    pub sweep: SnrRange,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            symbol_rate: 1000,
            link: LinkParams::default(),
            request: SimulationRequest::default(),
            sweep: SnrRange::default(),
        }
    }
}

impl SimConfig {
    /// Sample rate of exported waveforms in Hz
    pub fn sample_rate(&self) -> u32 {
        self.symbol_rate * self.link.sps as u32
    }
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Save configuration to file (JSON for `.json`, TOML otherwise)
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config).context("Failed to serialize config")?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}

/// Simulation parameters accepted on the command line.
///
/// Every flag is optional; a set flag overrides the config file value.
#[derive(Debug, Clone, Default, Args)]
pub struct SimArgs {
    /// Configuration file (JSON or TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of source bits
    #[arg(short = 'n', long)]
    pub bits: Option<usize>,

    /// Line code: nrz or manchester
    #[arg(long)]
    pub code: Option<String>,

    /// Channel SNR in dB
    #[arg(long, allow_hyphen_values = true)]
    pub snr: Option<f64>,

    /// Noise-free channel
    #[arg(long, conflicts_with = "snr")]
    pub ideal: bool,

    /// Samples per symbol
    #[arg(long)]
    pub sps: Option<usize>,

    /// RRC roll-off factor
    #[arg(long)]
    pub beta: Option<f64>,

    /// RRC span in symbols
    #[arg(long)]
    pub span: Option<usize>,

    /// Carrier frequency in cycles per symbol
    #[arg(long)]
    pub fc: Option<f64>,

    /// Carrier phase in radians, shared by both ends
    #[arg(long, allow_hyphen_values = true)]
    pub carrier_phase: Option<f64>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimArgs {
    /// Load the config file (or defaults) and apply command line overrides
    pub fn resolve(&self) -> Result<SimConfig> {
        let mut config: SimConfig = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };

        if let Some(bits) = self.bits {
            config.request.n_bits = bits;
        }
        if let Some(code) = &self.code {
            config.request.line_code = code.parse::<LineCode>()?;
        }
        if self.ideal {
            config.request.channel = ChannelModel::Ideal;
        } else if let Some(snr_db) = self.snr {
            config.request.channel = ChannelModel::Awgn { snr_db };
        }
        if let Some(sps) = self.sps {
            config.link.sps = sps;
        }
        if let Some(beta) = self.beta {
            config.link.beta = beta;
        }
        if let Some(span) = self.span {
            config.link.span = span;
        }
        if let Some(fc) = self.fc {
            config.link.carrier_frequency = fc;
        }
        if let Some(phase) = self.carrier_phase {
            config.link.carrier_phase = phase;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.link.validate().context("Invalid link parameters")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_config_serialization_toml() {
        let mut config = SimConfig::default();
        config.request.n_bits = 250;
        config.request.line_code = LineCode::Manchester;
        config.request.channel = ChannelModel::Awgn { snr_db: 6.0 };
        config.seed = 99;

        let temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        let path = temp_file.path().to_path_buf();

        save_config(&config, &path).unwrap();
        let loaded: SimConfig = load_config(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_config_serialization_json() {
        let config = SimConfig::default();
        let temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let path = temp_file.path().to_path_buf();

        save_config(&config, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('{'));

        let loaded: SimConfig = load_config(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(
            temp_file.path(),
            "seed = 5\n\n[link]\nsps = 8\n\n[request]\nline_code = \"manchester\"\n",
        )
        .unwrap();

        let loaded: SimConfig = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded.seed, 5);
        assert_eq!(loaded.link.sps, 8);
        assert_eq!(loaded.link.beta, 0.35);
        assert_eq!(loaded.request.line_code, LineCode::Manchester);
        assert_eq!(loaded.request.n_bits, 100);
        assert_eq!(loaded.sample_rate(), 8000);
    }

    #[test]
    fn test_args_override() {
        let args = SimArgs {
            bits: Some(12),
            code: Some("Manchester".to_string()),
            snr: Some(-3.0),
            sps: Some(8),
            seed: Some(4),
            ..SimArgs::default()
        };

        let config = args.resolve().unwrap();
        assert_eq!(config.request.n_bits, 12);
        assert_eq!(config.request.line_code, LineCode::Manchester);
        assert_eq!(config.request.channel, ChannelModel::Awgn { snr_db: -3.0 });
        assert_eq!(config.link.sps, 8);
        assert_eq!(config.seed, 4);
    }

    #[test]
    fn test_args_ideal_channel() {
        let args = SimArgs {
            ideal: true,
            ..SimArgs::default()
        };
        assert_eq!(args.resolve().unwrap().request.channel, ChannelModel::Ideal);
    }

    #[test]
    fn test_args_reject_unknown_code() {
        let args = SimArgs {
            code: Some("unknown".to_string()),
            ..SimArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_args_reject_invalid_link() {
        let args = SimArgs {
            beta: Some(0.0),
            ..SimArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
