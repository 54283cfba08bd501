use crate::wire::WlMessage;

pub const OP_GET_KEYBOARD: u16 = 1;

/// `wl_seat.get_keyboard(new_id id)`.
pub fn get_keyboard(seat_id: u32, keyboard_id: u32) -> WlMessage {
    WlMessage::new(
        seat_id,
        OP_GET_KEYBOARD,
        keyboard_id.to_le_bytes().to_vec(),
    )
}
