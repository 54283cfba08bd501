use crate::wire::codec;
use crate::wire::WlMessage;

pub const OP_BIND: u16 = 0;

/// `wl_registry.bind(uint name, new_id<interface, version> id)`.
///
/// The new-id argument for a dynamic bind is serialised as interface name,
/// version, then the allocated id — unlike a statically-typed new_id, which
/// is just the id.
pub fn bind(registry_id: u32, name: u32, interface: &str, version: u32, new_id: u32) -> WlMessage {
    let mut payload = Vec::new();
    payload.extend_from_slice(&name.to_le_bytes());
    payload.extend_from_slice(&codec::pack_string(interface));
    payload.extend_from_slice(&version.to_le_bytes());
    payload.extend_from_slice(&new_id.to_le_bytes());
    WlMessage::new(registry_id, OP_BIND, payload)
}
