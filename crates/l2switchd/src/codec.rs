//! Host transport framing.
//!
//! Every message on stdin/stdout starts with a 4-byte header:
//!
//! ```text
//! offset 0..2  size  (u16, big-endian, total length including this header)
//! offset 2..4  type  (u16, big-endian)
//! offset 4..   body
//! ```

use crate::error::{Result, SwitchdError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use l2switch_types::InterfaceNumber;
use tokio_util::codec::{Decoder, Encoder};

/// Size of the transport header.
pub const HEADER_LEN: usize = 4;

/// Largest message the 16-bit size field can describe.
pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize;

/// A decoded transport message, not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub msg_type: u16,
    pub body: Bytes,
}

/// A frame to be written out on one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundFrame {
    pub interface: InterfaceNumber,
    pub frame: Bytes,
}

/// Length-prefixed codec for the host transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportCodec;

impl Decoder for TransportCodec {
    type Item = RawMessage;
    type Error = SwitchdError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RawMessage>> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let size = usize::from(u16::from_be_bytes([src[0], src[1]]));
        let msg_type = u16::from_be_bytes([src[2], src[3]]);

        if size < HEADER_LEN {
            return Err(SwitchdError::Framing(format!(
                "message size {} is smaller than the {} byte header",
                size, HEADER_LEN
            )));
        }

        if src.len() < size {
            src.reserve(size - src.len());
            return Ok(None);
        }

        let mut message = src.split_to(size);
        message.advance(HEADER_LEN);

        Ok(Some(RawMessage {
            msg_type,
            body: message.freeze(),
        }))
    }
}

impl Encoder<OutboundFrame> for TransportCodec {
    type Error = SwitchdError;

    fn encode(&mut self, item: OutboundFrame, dst: &mut BytesMut) -> Result<()> {
        let size = HEADER_LEN + item.frame.len();
        let size = u16::try_from(size).map_err(|_| {
            SwitchdError::Framing(format!(
                "frame of {} bytes does not fit in a {} byte message",
                item.frame.len(),
                MAX_MESSAGE_LEN
            ))
        })?;

        dst.reserve(usize::from(size));
        dst.put_u16(size);
        dst.put_u16(item.interface.get());
        dst.extend_from_slice(&item.frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_waits_for_header() {
        let mut buf = BytesMut::from(&[0x00, 0x08][..]);
        assert_eq!(TransportCodec.decode(&mut buf).unwrap(), None);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_decode_waits_for_body() {
        let mut buf = BytesMut::from(&[0x00, 0x08, 0x00, 0x01, 0xaa, 0xbb][..]);
        assert_eq!(TransportCodec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(&[0xcc, 0xdd]);
        let message = TransportCodec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(message.msg_type, 1);
        assert_eq!(&message.body[..], &[0xaa, 0xbb, 0xcc, 0xdd]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_back_to_back_messages() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x00, 0x05, 0x00, 0x00, b'x']);
        buf.extend_from_slice(&[0x00, 0x04, 0x00, 0x02]);

        let first = TransportCodec.decode(&mut buf).unwrap().unwrap();
        let second = TransportCodec.decode(&mut buf).unwrap().unwrap();

        assert_eq!(first.msg_type, 0);
        assert_eq!(&first.body[..], b"x");
        assert_eq!(second.msg_type, 2);
        assert!(second.body.is_empty());
        assert_eq!(TransportCodec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_undersized_header() {
        let mut buf = BytesMut::from(&[0x00, 0x02, 0x00, 0x01][..]);
        let err = TransportCodec.decode(&mut buf).unwrap_err();
        assert!(matches!(err, SwitchdError::Framing(_)));
    }

    #[test]
    fn test_encode_prefixes_size_and_interface() {
        let mut buf = BytesMut::new();
        let item = OutboundFrame {
            interface: InterfaceNumber::new(3).unwrap(),
            frame: Bytes::from_static(&[1, 2, 3]),
        };

        TransportCodec.encode(item, &mut buf).unwrap();

        assert_eq!(&buf[..], &[0x00, 0x07, 0x00, 0x03, 1, 2, 3]);
    }

    #[test]
    fn test_encode_rejects_oversized_frame() {
        let mut buf = BytesMut::new();
        let item = OutboundFrame {
            interface: InterfaceNumber::FIRST,
            frame: Bytes::from(vec![0u8; MAX_MESSAGE_LEN]),
        };

        assert!(TransportCodec.encode(item, &mut buf).is_err());
        assert!(buf.is_empty());
    }
}
