use std::fmt;

use crate::error::MonitorError;
use crate::wire::codec::{self, HEADER_LEN};

/// The 8-byte header that precedes every message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WlMessageHeader {
    pub object_id: u32,
    pub opcode: u16,
    pub size: u16,
}

impl WlMessageHeader {
    fn parse(buf: &[u8]) -> Result<Self, MonitorError> {
        if buf.len() < HEADER_LEN {
            return Err(MonitorError::Protocol(format!(
                "buffer too short for message header: expected {HEADER_LEN} bytes, got {}",
                buf.len()
            )));
        }

        let object_id = codec::unpack_u32_at(buf, 0)?;
        let combined = codec::unpack_u32_at(buf, 4)?;
        let opcode = (combined & 0xFFFF) as u16;
        let size = (combined >> 16) as u16;

        if (size as usize) < HEADER_LEN || !size.is_multiple_of(4) {
            return Err(MonitorError::Protocol(format!(
                "impossible message size {size}: must be >= {HEADER_LEN} and a multiple of 4"
            )));
        }

        Ok(Self {
            object_id,
            opcode,
            size,
        })
    }
}

/// A fully framed message: target object, opcode, and raw payload bytes.
#[derive(Debug, Clone)]
pub struct WlMessage {
    pub object_id: u32,
    pub opcode: u16,
    pub payload: Vec<u8>,
}

impl WlMessage {
    pub fn new(object_id: u32, opcode: u16, payload: Vec<u8>) -> Self {
        Self {
            object_id,
            opcode,
            payload,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        codec::build_message(self.object_id, self.opcode, &self.payload)
    }
}

impl fmt::Display for WlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WlMessage {{ object_id: {}, opcode: {}, payload_len: {} }}",
            self.object_id,
            self.opcode,
            self.payload.len()
        )
    }
}

/// Accumulates bytes across receive calls and slices off complete messages
/// as they become available, per the greedy framing rule in the protocol
/// engine's message-framing contract.
#[derive(Default)]
pub struct MessageFramer {
    buf: Vec<u8>,
}

impl MessageFramer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pops the next complete message off the front of the buffer, if one
    /// is fully available. A malformed header is a fatal `ProtocolError`,
    /// surfaced to the caller rather than silently dropped.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<WlMessage>, MonitorError> {
        if self.buf.len() < HEADER_LEN {
            return Ok(None);
        }

        let header = WlMessageHeader::parse(&self.buf[..HEADER_LEN])?;
        let size = header.size as usize;
        if self.buf.len() < size {
            return Ok(None);
        }

        let payload = self.buf[HEADER_LEN..size].to_vec();
        self.buf.drain(..size);
        Ok(Some(WlMessage::new(header.object_id, header.opcode, payload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_two_complete_messages_and_buffers_the_half() {
        let m1 = codec::build_message(3, 0, &codec::pack_u32(7));
        let m2 = codec::build_message(4, 1, &[]);
        let mut combined = Vec::new();
        combined.extend_from_slice(&m1);
        combined.extend_from_slice(&m2);
        combined.extend_from_slice(&[1, 2, 3, 4, 5]); // half of a third header

        let mut framer = MessageFramer::new();
        framer.push(&combined);

        let first = framer.next().unwrap().unwrap();
        assert_eq!(first.object_id, 3);
        let second = framer.next().unwrap().unwrap();
        assert_eq!(second.object_id, 4);
        assert!(framer.next().unwrap().is_none());
    }

    #[test]
    fn rejects_impossible_size() {
        let mut framer = MessageFramer::new();
        // size field (upper 16 bits of word 2) of 3: below the 8-byte minimum.
        framer.push(&[1, 0, 0, 0, 3, 0, 0, 0]);
        assert!(framer.next().is_err());
    }

    #[test]
    fn message_round_trips_through_encode() {
        let original = WlMessage::new(5, 2, vec![9, 9, 9, 9]);
        let encoded = original.encode();
        let mut framer = MessageFramer::new();
        framer.push(&encoded);
        let parsed = framer.next().unwrap().unwrap();
        assert_eq!(parsed.object_id, original.object_id);
        assert_eq!(parsed.opcode, original.opcode);
        assert_eq!(parsed.payload, original.payload);
    }
}
