//! Error types for the forwarding core.

use thiserror::Error;

/// Result type alias for forwarding core operations.
pub type Result<T> = std::result::Result<T, SwitchError>;

/// Errors raised by the forwarding core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    /// Frame is shorter than the fixed Ethernet header.
    ///
    /// The engine recovers from this locally (the frame is dropped); it only
    /// surfaces as an `Err` from [`EthernetHeader::parse`](crate::EthernetHeader::parse).
    #[error("Malformed frame: {len} bytes is shorter than the {min} byte Ethernet header")]
    MalformedFrame {
        /// Length of the rejected frame.
        len: usize,
        /// Minimum acceptable length.
        min: usize,
    },

    /// An interface number outside `1..=interface_count` was referenced.
    ///
    /// This means the surrounding transport is miswired and is not
    /// recoverable.
    #[error("Unknown interface {interface} (switch has {interface_count} interfaces)")]
    UnknownInterface {
        /// The interface number that was referenced.
        interface: u16,
        /// Number of configured interfaces.
        interface_count: usize,
    },

    /// Switch configuration is not usable.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl SwitchError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = SwitchError::UnknownInterface {
            interface: 5,
            interface_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Unknown interface 5 (switch has 3 interfaces)"
        );

        let err = SwitchError::MalformedFrame { len: 10, min: 14 };
        assert_eq!(
            err.to_string(),
            "Malformed frame: 10 bytes is shorter than the 14 byte Ethernet header"
        );
    }

    #[test]
    fn test_invalid_config() {
        let err = SwitchError::invalid_config("capacity", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for capacity: must be at least 1"
        );
    }
}
