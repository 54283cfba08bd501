use crate::wire::WlMessage;

pub const OP_SYNC: u16 = 0;
pub const OP_GET_REGISTRY: u16 = 1;

/// `wl_display.sync(new_id callback)`.
pub fn sync(display_id: u32, callback_id: u32) -> WlMessage {
    WlMessage::new(display_id, OP_SYNC, callback_id.to_le_bytes().to_vec())
}

/// `wl_display.get_registry(new_id registry)`.
pub fn get_registry(display_id: u32, registry_id: u32) -> WlMessage {
    WlMessage::new(
        display_id,
        OP_GET_REGISTRY,
        registry_id.to_le_bytes().to_vec(),
    )
}
