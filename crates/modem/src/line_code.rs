//! NRZ and Manchester line coding with coding-aware hard decisions

use crate::{ModemError, Result};
use linksim_core::buffer::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line code applied before pulse shaping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCode {
    /// One antipodal symbol per bit: 0 -> -1, 1 -> +1
    #[default]
    Nrz,
    /// Two symbols per bit: 0 -> (+1, -1), 1 -> (-1, +1)
    Manchester,
}

impl LineCode {
    pub const ALL: [LineCode; 2] = [LineCode::Nrz, LineCode::Manchester];

    /// Symbols emitted per input bit
    pub fn symbols_per_bit(&self) -> usize {
        match self {
            LineCode::Nrz => 1,
            LineCode::Manchester => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineCode::Nrz => "nrz",
            LineCode::Manchester => "manchester",
        }
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineCode {
    type Err = ModemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nrz" => Ok(LineCode::Nrz),
            "manchester" => Ok(LineCode::Manchester),
            _ => Err(ModemError::InvalidArgument {
                msg: format!("Unknown coding scheme: {}", s),
            }),
        }
    }
}

/// Map bits to baseband symbols
pub fn encode(bits: &[u8], code: LineCode) -> Result<Vec<f64>> {
    if let Some(pos) = bits.iter().position(|&b| b > 1) {
        return Err(ModemError::InvalidArgument {
            msg: format!("bit {} has non-binary value {}", pos, bits[pos]),
        });
    }

    let symbols = match code {
        LineCode::Nrz => bits.iter().map(|&b| 2.0 * b as f64 - 1.0).collect(),
        LineCode::Manchester => bits
            .iter()
            .flat_map(|&b| if b == 0 { [1.0, -1.0] } else { [-1.0, 1.0] })
            .collect(),
    };

    Ok(symbols)
}

/// What to do with a Manchester pair that carries no valid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErasurePolicy {
    /// Store 0 in the bit slot and record the position as an erasure
    #[default]
    Mark,
    /// Fail with [`ModemError::AmbiguousSymbol`]
    Reject,
}

/// Recovered bits plus the positions that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decision {
    pub bits: Vec<u8>,
    pub erasures: Vec<usize>,
}

impl Decision {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn has_erasures(&self) -> bool {
        !self.erasures.is_empty()
    }
}

/// Hard decision with the default [`ErasurePolicy::Mark`] policy
pub fn decide<T: Sample>(samples: &[T], code: LineCode) -> Result<Decision> {
    decide_with_policy(samples, code, ErasurePolicy::Mark)
}

/// Hard decision on the in-phase component of each sample.
///
/// NRZ: `1` when the sample is strictly positive, else `0`.
/// Manchester: each consecutive pair `(s0, s1)` is `0` for a falling
/// transition, `1` for a rising one, and ambiguous otherwise. A trailing
/// unpaired sample is ignored.
pub fn decide_with_policy<T: Sample>(
    samples: &[T],
    code: LineCode,
    policy: ErasurePolicy,
) -> Result<Decision> {
    match code {
        LineCode::Nrz => Ok(Decision {
            bits: samples.iter().map(|s| (s.in_phase() > 0.0) as u8).collect(),
            erasures: Vec::new(),
        }),
        LineCode::Manchester => {
            let mut decision = Decision {
                bits: Vec::with_capacity(samples.len() / 2),
                erasures: Vec::new(),
            };

            for (index, pair) in samples.chunks_exact(2).enumerate() {
                let (s0, s1) = (pair[0].in_phase(), pair[1].in_phase());
                let bit = if s0 > 0.0 && s1 < 0.0 {
                    0
                } else if s0 < 0.0 && s1 > 0.0 {
                    1
                } else {
                    if policy == ErasurePolicy::Reject {
                        return Err(ModemError::AmbiguousSymbol { index });
                    }
                    decision.erasures.push(index);
                    0
                };
                decision.bits.push(bit);
            }

            if decision.has_erasures() {
                tracing::warn!(
                    "Manchester decision erased {} of {} bits",
                    decision.erasures.len(),
                    decision.bits.len()
                );
            }

            Ok(decision)
        }
    }
}
