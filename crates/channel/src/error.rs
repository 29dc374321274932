//! Error types for linksim channel models

use thiserror::Error;

/// Channel error types
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Invalid argument: {msg}")]
    InvalidArgument { msg: String },
}

/// Result type for linksim channel operations
pub type Result<T> = std::result::Result<T, ChannelError>;
