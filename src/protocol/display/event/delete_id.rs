use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 1;

/// `wl_display.delete_id(uint id)`: the server confirms an object has been
/// destroyed and its id may be reused.
pub struct DeleteId {
    pub id: u32,
}

impl DeleteId {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        Ok(Self {
            id: codec::unpack_u32_at(payload, 0)?,
        })
    }
}
