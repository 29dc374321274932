//! Error types for linksim modem

use thiserror::Error;

/// Modem error types
#[derive(Error, Debug)]
pub enum ModemError {
    #[error("Invalid argument: {msg}")]
    InvalidArgument { msg: String },

    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Ambiguous Manchester pair at bit {index}")]
    AmbiguousSymbol { index: usize },

    #[error("Core error: {0}")]
    Core(#[from] linksim_core::CoreError),
}

/// Result type for linksim modem operations
pub type Result<T> = std::result::Result<T, ModemError>;
