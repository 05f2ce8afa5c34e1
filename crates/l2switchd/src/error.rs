//! Error types for l2switchd

use l2switch_fdb::SwitchError;
use thiserror::Error;

/// Switch daemon errors
#[derive(Error, Debug)]
pub enum SwitchdError {
    /// Forwarding core rejected a request
    #[error("Switch error: {0}")]
    Switch(#[from] SwitchError),

    /// Transport byte stream could not be decoded
    #[error("Framing error: {0}")]
    Framing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (task failure, logger setup)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for l2switchd operations
pub type Result<T> = std::result::Result<T, SwitchdError>;
