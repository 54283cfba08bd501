use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 1;

/// `wl_seat.name(string name)`.
pub struct Name {
    pub name: String,
}

impl Name {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        let (name, _) = codec::unpack_string_at(payload, 0)?;
        Ok(Self { name })
    }
}
