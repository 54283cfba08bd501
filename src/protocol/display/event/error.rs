use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 0;

/// `wl_display.error(object object_id, uint code, string message)`.
pub struct Error {
    pub object_id: u32,
    pub code: u32,
    pub message: String,
}

impl Error {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        let object_id = codec::unpack_u32_at(payload, 0)?;
        let code = codec::unpack_u32_at(payload, 4)?;
        let (message, _) = codec::unpack_string_at(payload, 8)?;
        Ok(Self {
            object_id,
            code,
            message,
        })
    }
}
