use crate::error::MonitorError;
use crate::wire::codec;

pub const OPCODE: u16 = 4;

/// `wl_keyboard.modifiers(uint serial, uint mods_depressed, uint mods_latched,
/// uint mods_locked, uint group)`. Only `group` matters to layout tracking;
/// the modifier masks are parsed but otherwise unused.
pub struct Modifiers {
    pub serial: u32,
    pub mods_depressed: u32,
    pub mods_latched: u32,
    pub mods_locked: u32,
    pub group: u32,
}

impl Modifiers {
    pub fn parse(payload: &[u8]) -> Result<Self, MonitorError> {
        Ok(Self {
            serial: codec::unpack_u32_at(payload, 0)?,
            mods_depressed: codec::unpack_u32_at(payload, 4)?,
            mods_latched: codec::unpack_u32_at(payload, 8)?,
            mods_locked: codec::unpack_u32_at(payload, 12)?,
            group: codec::unpack_u32_at(payload, 16)?,
        })
    }
}
