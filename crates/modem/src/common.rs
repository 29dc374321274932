//! Link parameters shared by the transmitter and receiver

use crate::{ModemError, Result};
use linksim_core::filter::RrcParams;
use serde::{Deserialize, Serialize};

/// Physical-layer parameters of one simulated link.
///
/// A `Transmitter` and a `Receiver` built from the same `LinkParams` share
/// the pulse shape (required for the matched filter) and the carrier phase
/// (perfect carrier synchronization).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// Samples per symbol
    pub sps: usize,
    /// RRC roll-off factor, `0 < beta <= 1`
    pub beta: f64,
    /// RRC span in symbols
    pub span: usize,
    /// Carrier frequency in cycles per symbol
    pub carrier_frequency: f64,
    /// Carrier phase in radians, identical at both ends
    pub carrier_phase: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            sps: 16,
            beta: 0.35,
            span: 32,
            carrier_frequency: 2.0,
            carrier_phase: 0.0,
        }
    }
}

impl LinkParams {
    /// Create link parameters with zero carrier phase
    pub fn new(sps: usize, beta: f64, span: usize, carrier_frequency: f64) -> Result<Self> {
        let params = Self {
            sps,
            beta,
            span,
            carrier_frequency,
            carrier_phase: 0.0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Set the shared carrier phase
    pub fn with_carrier_phase(mut self, phase: f64) -> Result<Self> {
        if !phase.is_finite() {
            return Err(ModemError::InvalidArgument {
                msg: format!("Invalid carrier phase: {}", phase),
            });
        }
        self.carrier_phase = phase;
        Ok(self)
    }

    /// Check every field and return the filter design parameters
    pub fn validate(&self) -> Result<RrcParams> {
        if !self.carrier_frequency.is_finite() || self.carrier_frequency < 0.0 {
            return Err(ModemError::InvalidArgument {
                msg: format!("Invalid carrier frequency: {}", self.carrier_frequency),
            });
        }

        if !self.carrier_phase.is_finite() {
            return Err(ModemError::InvalidArgument {
                msg: format!("Invalid carrier phase: {}", self.carrier_phase),
            });
        }

        self.rrc_params()
    }

    /// RRC design parameters for this link
    pub fn rrc_params(&self) -> Result<RrcParams> {
        Ok(RrcParams::new(self.sps, self.beta, self.span)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = LinkParams::default();
        assert_eq!(params.sps, 16);
        assert_eq!(params.beta, 0.35);
        assert_eq!(params.span, 32);
        assert_eq!(params.carrier_frequency, 2.0);
        assert_eq!(params.carrier_phase, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        assert!(LinkParams::new(0, 0.35, 32, 2.0).is_err());
        assert!(LinkParams::new(16, 0.0, 32, 2.0).is_err());
        assert!(LinkParams::new(16, 0.35, 0, 2.0).is_err());
        assert!(LinkParams::new(16, 0.35, 32, -1.0).is_err());
        assert!(LinkParams::new(16, 0.35, 32, f64::NAN).is_err());
    }

    #[test]
    fn test_carrier_phase() {
        let params = LinkParams::default().with_carrier_phase(0.5).unwrap();
        assert_eq!(params.carrier_phase, 0.5);
        assert!(LinkParams::default().with_carrier_phase(f64::INFINITY).is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let params: LinkParams = serde_json::from_str(r#"{"sps": 8}"#).unwrap();
        assert_eq!(params.sps, 8);
        assert_eq!(params.span, 32);
    }
}
