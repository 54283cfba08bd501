//! From-scratch Wayland client that watches the compositor's keyboard and
//! reports the active XKB layout by name, without depending on
//! `libwayland-client` or the `wayland-client` crate.

pub mod error;
pub mod keymap;
pub mod layout;
pub mod protocol;
pub mod registry;
pub mod transport;
pub mod wire;

use std::os::fd::RawFd;

pub use error::MonitorError;
use protocol::ProtocolEngine;

/// Public facade: connect, pump the returned fd through your own event
/// loop, call `dispatch()` whenever it's readable.
pub struct WaylandKeyboardMonitor<F: FnMut(&str)> {
    engine: ProtocolEngine<F>,
}

impl<F: FnMut(&str)> WaylandKeyboardMonitor<F> {
    pub fn new(on_layout_change: F) -> Self {
        Self {
            engine: ProtocolEngine::new(on_layout_change),
        }
    }

    /// Connects to the compositor and runs the initial handshake. Returns
    /// the socket fd so the caller can poll it for readability.
    pub fn connect(&mut self) -> Result<RawFd, MonitorError> {
        self.engine.connect()
    }

    /// Drains and handles whatever is currently available on the socket.
    /// Call this when the fd returned by `connect` becomes readable.
    pub fn dispatch(&mut self) -> Result<(), MonitorError> {
        self.engine.dispatch()
    }

    pub fn disconnect(&mut self) {
        self.engine.disconnect();
    }

    pub fn layout_names(&self) -> &[String] {
        self.engine.layout_names()
    }

    pub fn current_group(&self) -> u32 {
        self.engine.current_group()
    }
}
