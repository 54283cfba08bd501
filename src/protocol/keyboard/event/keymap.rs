use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 0;

pub const FORMAT_NO_KEYMAP: u32 = 0;
pub const FORMAT_XKB_V1: u32 = 1;

/// `wl_keyboard.keymap(uint format, fd, uint size)`.
///
/// The fd itself travels out-of-band as `SCM_RIGHTS` ancillary data; this
/// struct only carries the in-band fields, the fd is matched up separately
/// from the transport's receive-time fd queue.
pub struct Keymap {
    pub format: u32,
    pub size: u32,
}

impl Keymap {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        let format = codec::unpack_u32_at(payload, 0)?;
        let size = codec::unpack_u32_at(payload, 4)?;
        Ok(Self { format, size })
    }
}
