//! Interpretation of inbound transport messages.

use crate::codec::RawMessage;
use crate::error::{Result, SwitchdError};
use bytes::Bytes;
use l2switch_types::{InterfaceNumber, MacAddress};

/// Message type carrying a control channel command.
pub const CONTROL_MSG_TYPE: u16 = 0;

/// Flag marking a MAC announcement; the low 15 bits hold the interface number.
pub const MAC_ANNOUNCE_FLAG: u16 = 0x8000;

/// Highest interface number the transport can address.
pub const MAX_TRANSPORT_INTERFACE: u16 = MAC_ANNOUNCE_FLAG - 1;

/// What an inbound message asks the switch to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Text entered on the control channel.
    Control(String),
    /// MAC identity of an interface.
    AnnounceMac {
        interface: InterfaceNumber,
        mac: MacAddress,
    },
    /// Ethernet frame received on an interface.
    Frame {
        interface: InterfaceNumber,
        frame: Bytes,
    },
}

impl InboundMessage {
    /// Interprets a decoded transport message.
    ///
    /// Interface range is not checked here; the forwarding core owns that.
    pub fn classify(raw: RawMessage) -> Result<Self> {
        if raw.msg_type == CONTROL_MSG_TYPE {
            return Ok(InboundMessage::Control(control_text(&raw.body)));
        }

        if raw.msg_type & MAC_ANNOUNCE_FLAG != 0 {
            let number = raw.msg_type & !MAC_ANNOUNCE_FLAG;
            let interface = InterfaceNumber::new(number).map_err(|e| {
                SwitchdError::Framing(format!("MAC announcement: {}", e))
            })?;
            let mac = MacAddress::from_slice(&raw.body).map_err(|e| {
                SwitchdError::Framing(format!("MAC announcement for interface {}: {}", interface, e))
            })?;
            return Ok(InboundMessage::AnnounceMac { interface, mac });
        }

        let interface = InterfaceNumber::new(raw.msg_type)
            .map_err(|e| SwitchdError::Framing(e.to_string()))?;
        Ok(InboundMessage::Frame {
            interface,
            frame: raw.body,
        })
    }
}

/// Decodes control channel bytes, dropping the trailing line terminator.
fn control_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .trim_end_matches(['\n', '\r', '\0'])
        .to_string()
}
