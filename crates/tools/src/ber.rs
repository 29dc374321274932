//! Bit error rate counting

use serde::{Deserialize, Serialize};

/// Result of a positional bit comparison
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BerStats {
    /// Mismatched positions
    pub errors: usize,
    /// Positions compared, `min(original, recovered)`
    pub compared: usize,
    /// `errors / compared`, or 0 when nothing was compared
    pub ber: f64,
}

impl BerStats {
    /// Merge two counts, e.g. across repeated runs
    pub fn combine(&self, other: &BerStats) -> BerStats {
        let errors = self.errors + other.errors;
        let compared = self.compared + other.compared;
        BerStats {
            errors,
            compared,
            ber: ratio(errors, compared),
        }
    }
}

fn ratio(errors: usize, compared: usize) -> f64 {
    if compared == 0 {
        0.0
    } else {
        errors as f64 / compared as f64
    }
}

/// Compare two bit sequences position by position, truncating to the
/// shorter one
pub fn bit_error_rate(original: &[u8], recovered: &[u8]) -> BerStats {
    let compared = original.len().min(recovered.len());
    let errors = original
        .iter()
        .zip(recovered.iter())
        .filter(|(a, b)| a != b)
        .count();

    BerStats {
        errors,
        compared,
        ber: ratio(errors, compared),
    }
}
