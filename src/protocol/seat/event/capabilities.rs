use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 0;

/// Bit in `wl_seat.capabilities` signalling keyboard support.
pub const CAPABILITY_KEYBOARD: u32 = 2;

/// `wl_seat.capabilities(uint capabilities)`.
pub struct Capabilities {
    pub capabilities: u32,
}

impl Capabilities {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        Ok(Self {
            capabilities: codec::unpack_u32_at(payload, 0)?,
        })
    }

    pub fn has_keyboard(&self) -> bool {
        self.capabilities & CAPABILITY_KEYBOARD != 0
    }
}
