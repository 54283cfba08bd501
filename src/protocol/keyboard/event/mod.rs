pub mod enter;
pub mod key;
pub mod keymap;
pub mod leave;
pub mod modifiers;
pub mod repeat_info;

pub use keymap::Keymap;
pub use modifiers::Modifiers;
