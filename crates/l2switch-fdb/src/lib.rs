//! Forwarding database (MAC learning) and forwarding decisions for a
//! transparent Ethernet learning switch.
//!
//! The crate is organised around two components:
//!
//! - [`AddressTable`]: bounded MAC → interface table with oldest-entry eviction
//! - [`ForwardingEngine`]: validates a received frame, learns its source,
//!   decides the outbound interfaces and hands the frame to a [`FrameSink`]
//!
//! # Example
//!
//! ```
//! use l2switch_fdb::{ForwardDecision, ForwardingEngine, SwitchConfig};
//! use l2switch_types::InterfaceNumber;
//! use std::time::Instant;
//!
//! let engine = ForwardingEngine::new(SwitchConfig::new(3)).unwrap();
//! let ifc1 = InterfaceNumber::new(1).unwrap();
//!
//! // broadcast destination, source 02:00:00:00:00:aa
//! let mut frame = vec![0xff; 6];
//! frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 0xaa]);
//! frame.extend_from_slice(&[0x08, 0x00]);
//!
//! let mut sent = Vec::new();
//! let mut sink = |ifc: InterfaceNumber, _: &[u8]| sent.push(ifc.get());
//! let decision = engine
//!     .handle_frame(ifc1, &frame, Instant::now(), &mut sink)
//!     .unwrap();
//!
//! assert!(matches!(decision, ForwardDecision::Flood(_)));
//! assert_eq!(sent, vec![2, 3]);
//! ```

mod config;
mod engine;
mod error;
mod frame;
mod stats;
mod table;

pub use config::{SwitchConfig, DEFAULT_CAPACITY, MAX_INTERFACES};
pub use engine::{ControlAck, ForwardDecision, ForwardingEngine, FrameSink, Interface};
pub use error::{Result, SwitchError};
pub use frame::EthernetHeader;
pub use stats::{SwitchStats, SwitchStatsSnapshot};
pub use table::{AddressTable, AddressTableEntry, LearnOutcome, Timestamp};

pub use l2switch_types::{InterfaceNumber, MacAddress};
