use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 1;

/// `wl_registry.global_remove(uint name)`.
pub struct GlobalRemove {
    pub name: u32,
}

impl GlobalRemove {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        Ok(Self {
            name: codec::unpack_u32_at(payload, 0)?,
        })
    }
}
