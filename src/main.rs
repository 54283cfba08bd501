//! Minimal demo binary: connects, prints the active layout name on every
//! change, and blocks on `poll()` in between. No CLI parsing or signal
//! handling — that belongs to whatever wraps this library into a tray
//! indicator.

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::os::fd::BorrowedFd;

use wl_kbd_monitor::WaylandKeyboardMonitor;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "demo-logging")]
    env_logger::init();

    let mut monitor = WaylandKeyboardMonitor::new(|name: &str| {
        println!("layout: {name}");
    });

    let fd = monitor.connect()?;
    // SAFETY: `fd` is owned by `monitor` and stays open for as long as we
    // poll it here, within this loop's scope.
    let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };

    loop {
        let mut fds = [PollFd::new(borrowed, PollFlags::POLLIN)];
        poll(&mut fds, PollTimeout::NONE)?;
        monitor.dispatch()?;
    }
}
