//! Error types for linksim core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {msg}")]
    InvalidArgument { msg: String },

    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("FFT error: {msg}")]
    FftError { msg: String },
}

/// Result type for linksim core operations
pub type Result<T> = std::result::Result<T, CoreError>;
