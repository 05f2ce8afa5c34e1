//! # l2switchd - Transparent Ethernet learning switch daemon
//!
//! Connects the forwarding core in `l2switch-fdb` to its host process over
//! stdin/stdout.
//!
//! ## Responsibilities
//! - Decode length-prefixed transport messages from stdin
//! - Route frames, MAC announcements and control commands to the engine
//! - Encode emitted frames onto stdout through a bounded queue
//! - Load configuration from TOML and command line flags
//!
//! ## Message types
//! - `0`: control command text (acknowledged and ignored)
//! - `1..=N`: Ethernet frame received on interface N
//! - `0x8000 | N`: 6-byte MAC identity of interface N

pub mod codec;
pub mod config;
pub mod daemon;
pub mod error;
pub mod message;

pub use codec::{OutboundFrame, RawMessage, TransportCodec, HEADER_LEN};
pub use config::{Args, SwitchdConfig, DEFAULT_CONFIG_PATH};
pub use daemon::{OutboundQueue, Switchd};
pub use error::{Result, SwitchdError};
pub use message::{InboundMessage, CONTROL_MSG_TYPE, MAC_ANNOUNCE_FLAG};
