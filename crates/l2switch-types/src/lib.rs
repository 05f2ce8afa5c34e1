//! Common types for the learning switch.
//!
//! This crate provides type-safe representations of the primitives shared by
//! the forwarding core and the switch daemon:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`InterfaceNumber`]: 1-based switch interface numbers

mod interface;
mod mac;

pub use interface::InterfaceNumber;
pub use mac::MacAddress;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid MAC address length: expected 6 bytes, got {0}")]
    InvalidMacLength(usize),

    #[error("invalid interface number: {0} (interfaces are numbered from 1)")]
    InvalidInterfaceNumber(u16),

    #[error("invalid interface number: {0:?} is not a number")]
    InvalidInterfaceString(String),
}
