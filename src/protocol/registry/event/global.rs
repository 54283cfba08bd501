use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 0;

/// `wl_registry.global(uint name, string interface, uint version)`.
pub struct Global {
    pub name: u32,
    pub interface: String,
    pub version: u32,
}

impl Global {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        let name = codec::unpack_u32_at(payload, 0)?;
        let (interface, next) = codec::unpack_string_at(payload, 4)?;
        let version = codec::unpack_u32_at(payload, next)?;
        Ok(Self {
            name,
            interface,
            version,
        })
    }
}
