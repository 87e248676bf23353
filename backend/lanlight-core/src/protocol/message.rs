//! Datagram envelope: the 36-byte LIFX header followed by one payload.
//!
//! ```text
//! 0   size u16 | protocol:12 addressable:1 tagged:1 origin:2 | source u32
//! 8   target [u8; 8]
//! 16  reserved [u8; 6] | res_required:1 ack_required:1 | sequence u8
//! 24  reserved [u8; 8]
//! 32  pkt_type u16 | reserved u16
//! ```

use super::payloads::Payload;
use super::wire::{Buf, BufMut, Wire, ensure_remaining};
use crate::error::wire::WireError;

use models::Serial;

pub const HEADER_SIZE: usize = 36;
pub const PROTOCOL_NUMBER: u16 = 1024;

const PROTOCOL_MASK: u16 = 0x0fff;
const ADDRESSABLE_BIT: u16 = 1 << 12;
const TAGGED_BIT: u16 = 1 << 13;
const RES_REQUIRED_BIT: u8 = 1 << 0;
const ACK_REQUIRED_BIT: u8 = 1 << 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Total datagram length, header included.
    pub size: u16,
    pub tagged: bool,
    pub source: u32,
    pub target: Serial,
    pub res_required: bool,
    pub ack_required: bool,
    pub sequence: u8,
    pub pkt_type: u16,
}

impl Header {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        let mut flags = PROTOCOL_NUMBER | ADDRESSABLE_BIT;
        if self.tagged {
            flags |= TAGGED_BIT;
        }
        let mut response = 0u8;
        if self.res_required {
            response |= RES_REQUIRED_BIT;
        }
        if self.ack_required {
            response |= ACK_REQUIRED_BIT;
        }

        buf.put_u16_le(self.size);
        buf.put_u16_le(flags);
        buf.put_u32_le(self.source);
        buf.put_slice(self.target.as_bytes());
        buf.put_bytes(0, 6);
        buf.put_u8(response);
        buf.put_u8(self.sequence);
        buf.put_bytes(0, 8);
        buf.put_u16_le(self.pkt_type);
        buf.put_bytes(0, 2);
    }

    #[track_caller]
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        ensure_remaining(buf, HEADER_SIZE, "header")?;

        let size = buf.get_u16_le();
        let flags = buf.get_u16_le();
        let protocol = flags & PROTOCOL_MASK;
        if protocol != PROTOCOL_NUMBER {
            return Err(WireError::header(format!(
                "protocol {protocol}, expected {PROTOCOL_NUMBER}"
            )));
        }
        let source = buf.get_u32_le();
        let target = Serial(<[u8; 8]>::decode(buf)?);
        buf.advance(6);
        let response = buf.get_u8();
        let sequence = buf.get_u8();
        buf.advance(8);
        let pkt_type = buf.get_u16_le();
        buf.advance(2);

        Ok(Header {
            size,
            tagged: flags & TAGGED_BIT != 0,
            source,
            target,
            res_required: response & RES_REQUIRED_BIT != 0,
            ack_required: response & ACK_REQUIRED_BIT != 0,
            sequence,
            pkt_type,
        })
    }
}

/// One protocol message. The header's `size`, `tagged` and `pkt_type` are
/// derived from the payload and target when encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub payload: Payload,
}

impl Message {
    pub fn new(payload: impl Into<Payload>) -> Self {
        let payload = payload.into();
        Message {
            header: Header {
                pkt_type: payload.pkt_type(),
                tagged: true,
                ..Header::default()
            },
            payload,
        }
    }

    pub fn set_source(&mut self, source: u32) {
        self.header.source = source;
    }

    /// Sets the target; the broadcast serial marks the message tagged.
    pub fn set_target(&mut self, target: Serial) {
        self.header.target = target;
        self.header.tagged = target.is_nil();
    }

    pub fn set_sequence(&mut self, sequence: u8) {
        self.header.sequence = sequence;
    }

    pub fn target(&self) -> Serial {
        self.header.target
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.encoded_len()
    }

    #[track_caller]
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let len = self.encoded_len();
        let size = u16::try_from(len)
            .map_err(|_| WireError::oversize(format!("{len} bytes exceed the u16 size field")))?;

        let header = Header {
            size,
            tagged: self.header.target.is_nil(),
            pkt_type: self.payload.pkt_type(),
            ..self.header
        };

        let mut buf = Vec::with_capacity(len);
        header.encode(&mut buf);
        self.payload.encode(&mut buf);
        Ok(buf)
    }

    /// Decodes one datagram. Unregistered type codes yield
    /// [`Payload::Unknown`] rather than an error.
    #[track_caller]
    pub fn decode(datagram: &[u8]) -> Result<Self, WireError> {
        let mut buf = datagram;
        let header = Header::decode(&mut buf)?;
        if usize::from(header.size) != datagram.len() {
            return Err(WireError::header(format!(
                "size field says {} bytes, datagram has {}",
                header.size,
                datagram.len()
            )));
        }

        let payload = Payload::decode(header.pkt_type, buf)?;
        Ok(Message { header, payload })
    }
}
