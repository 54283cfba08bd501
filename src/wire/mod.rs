pub mod codec;
pub mod message;

pub use message::{MessageFramer, WlMessage};
