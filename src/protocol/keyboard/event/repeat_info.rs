/// `wl_keyboard.repeat_info` — not needed for layout tracking, consumed and
/// ignored by the dispatch loop.
pub const OPCODE: u16 = 5;
