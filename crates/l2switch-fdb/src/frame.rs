//! Ethernet header view.

use crate::error::{Result, SwitchError};
use l2switch_types::MacAddress;

/// The fixed 14-byte prefix of an Ethernet frame.
///
/// ```text
/// offset 0..6   destination MAC
/// offset 6..12  source MAC
/// offset 12..14 tag/type (big-endian, opaque)
/// offset 14..   payload (opaque)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: MacAddress,
    pub src: MacAddress,
    /// Tag/type field, carried opaquely.
    pub tag: u16,
}

impl EthernetHeader {
    /// Size of the header on the wire.
    pub const LEN: usize = 14;

    /// Parses the header from the start of `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::MalformedFrame`] if `frame` is shorter than
    /// [`EthernetHeader::LEN`].
    pub fn parse(frame: &[u8]) -> Result<Self> {
        if frame.len() < Self::LEN {
            return Err(SwitchError::MalformedFrame {
                len: frame.len(),
                min: Self::LEN,
            });
        }

        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&frame[0..6]);
        src.copy_from_slice(&frame[6..12]);

        Ok(Self {
            dst: MacAddress::new(dst),
            src: MacAddress::new(src),
            tag: u16::from_be_bytes([frame[12], frame[13]]),
        })
    }
}
