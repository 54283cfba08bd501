use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 0;

/// `wl_callback.done(uint callback_data)`.
pub struct Done {
    pub callback_data: u32,
}

impl Done {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        Ok(Self {
            callback_data: codec::unpack_u32_at(payload, 0)?,
        })
    }
}
