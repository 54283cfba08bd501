/// `wl_keyboard.key` — not needed for layout tracking, consumed and
/// ignored by the dispatch loop.
pub const OPCODE: u16 = 3;
