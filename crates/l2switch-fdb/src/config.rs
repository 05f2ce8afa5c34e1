//! Forwarding core configuration.

use crate::error::{Result, SwitchError};
use serde::{Deserialize, Serialize};

/// Default number of address table slots.
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest interface count representable in the 16-bit interface numbering.
pub const MAX_INTERFACES: usize = u16::MAX as usize;

/// Static configuration owned by a [`ForwardingEngine`](crate::ForwardingEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Number of interfaces; they are numbered `1..=interface_count`.
    pub interface_count: usize,
    /// Number of address table slots.
    pub capacity: usize,
}

impl SwitchConfig {
    /// Creates a configuration for `interface_count` interfaces with the
    /// default table capacity.
    pub fn new(interface_count: usize) -> Self {
        Self {
            interface_count,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Overrides the address table capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.interface_count == 0 {
            return Err(SwitchError::invalid_config(
                "interface_count",
                "at least one interface is required",
            ));
        }

        if self.interface_count > MAX_INTERFACES {
            return Err(SwitchError::invalid_config(
                "interface_count",
                format!("must not exceed {}", MAX_INTERFACES),
            ));
        }

        if self.capacity == 0 {
            return Err(SwitchError::invalid_config(
                "capacity",
                "address table needs at least one slot",
            ));
        }

        Ok(())
    }
}
