//! WireCodec: packing and unpacking the little-endian, 4-byte-aligned
//! primitives the Wayland wire format is built from.

use crate::error::MonitorError;

/// Size of a message header: object id (u32) + (size<<16 | opcode) (u32).
pub const HEADER_LEN: usize = 8;

fn roundup_4(n: usize) -> usize {
    (n + 3) & !3
}

pub fn pack_u32(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

pub fn pack_i32(v: i32) -> [u8; 4] {
    v.to_le_bytes()
}

pub fn unpack_u32_at(buf: &[u8], offset: usize) -> Result<u32, MonitorError> {
    let bytes = buf.get(offset..offset + 4).ok_or_else(|| {
        MonitorError::Malformed(format!(
            "buffer too short for u32 at offset {offset}: {} bytes available",
            buf.len()
        ))
    })?;
    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}

/// Packs a string as: u32 length (content bytes + NUL), UTF-8 content, NUL,
/// then zero padding out to the next 4-byte boundary.
pub fn pack_string(s: &str) -> Vec<u8> {
    let mut content = s.as_bytes().to_vec();
    content.push(0);
    let content_len = content.len() as u32;

    let mut out = Vec::with_capacity(4 + roundup_4(content.len()));
    out.extend_from_slice(&content_len.to_le_bytes());
    out.extend_from_slice(&content);
    out.resize(4 + roundup_4(content.len()), 0);
    out
}

/// Reads a wire string starting at `offset`. Returns the decoded string and
/// the offset of the next field.
pub fn unpack_string_at(buf: &[u8], offset: usize) -> Result<(String, usize), MonitorError> {
    let content_len = unpack_u32_at(buf, offset)? as usize;
    let start = offset + 4;
    let end = start.checked_add(content_len).ok_or_else(|| {
        MonitorError::Malformed("string length overflowed buffer bounds".to_string())
    })?;
    if end > buf.len() {
        return Err(MonitorError::Malformed(format!(
            "string content of {content_len} bytes exceeds remaining buffer of {} bytes",
            buf.len() - start.min(buf.len())
        )));
    }

    let content = &buf[start..end];
    let nul_pos = content
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| MonitorError::Malformed("wire string missing NUL terminator".to_string()))?;
    let s = String::from_utf8_lossy(&content[..nul_pos]).into_owned();

    let padded = roundup_4(content_len);
    let next = start + padded;
    if next > buf.len() {
        return Err(MonitorError::Malformed(
            "string padding exceeds remaining buffer".to_string(),
        ));
    }
    Ok((s, next))
}

/// Builds a complete message: 8-byte header followed by the payload.
pub fn build_message(obj_id: u32, opcode: u16, payload: &[u8]) -> Vec<u8> {
    let size = (HEADER_LEN + payload.len()) as u32;
    let combined = (size << 16) | opcode as u32;

    let mut out = Vec::with_capacity(size as usize);
    out.extend_from_slice(&obj_id.to_le_bytes());
    out.extend_from_slice(&combined.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_string_pads_to_four_bytes() {
        let packed = pack_string("hi");
        // 4 (len prefix) + roundup_4(2 + 1 nul) = 4 + 4 = 8
        assert_eq!(packed.len(), 8);
        assert_eq!(packed.len() % 4, 0);
        assert_eq!(&packed[4..7], b"hi\0");
    }

    #[test]
    fn pack_string_empty() {
        let packed = pack_string("");
        assert_eq!(packed.len(), 8);
        assert_eq!(packed[4], 0);
    }

    #[test]
    fn round_trip_string() {
        for s in ["", "a", "wl_seat", "a string that is exactly 12"] {
            let packed = pack_string(s);
            let (decoded, next) = unpack_string_at(&packed, 0).unwrap();
            assert_eq!(decoded, s);
            assert_eq!(next, packed.len());
        }
    }

    #[test]
    fn unpack_string_rejects_truncated_buffer() {
        let packed = pack_string("wl_seat");
        let truncated = &packed[..packed.len() - 2];
        assert!(unpack_string_at(truncated, 0).is_err());
    }

    #[test]
    fn build_message_header_fields() {
        let msg = build_message(3, 1, pack_u32(42).as_ref());
        let obj_id = u32::from_le_bytes(msg[0..4].try_into().unwrap());
        let combined = u32::from_le_bytes(msg[4..8].try_into().unwrap());
        assert_eq!(obj_id, 3);
        assert_eq!(combined & 0xFFFF, 1);
        assert_eq!(combined >> 16, msg.len() as u32);
        assert_eq!(msg.len() % 4, 0);
        assert!(msg.len() >= HEADER_LEN);
    }
}
