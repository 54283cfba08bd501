//! SocketTransport: the Unix-domain stream connection to the compositor,
//! including ancillary-data (`SCM_RIGHTS`) fd passing.

use std::io::Write;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;

use nix::sys::socket::{
    self, ControlMessage, ControlMessageOwned, MsgFlags, UnixAddr,
};
use std::io::{IoSlice, IoSliceMut};

use crate::error::MonitorError;

const RECV_BUF_LEN: usize = 4096;
const MAX_RECV_FDS: usize = 4;

pub struct SocketTransport {
    stream: UnixStream,
}

fn resolve_socket_path() -> Result<std::path::PathBuf, MonitorError> {
    let display = std::env::var("WAYLAND_DISPLAY").unwrap_or_else(|_| "wayland-0".to_string());
    if display.starts_with('/') {
        return Ok(std::path::PathBuf::from(display));
    }
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").map_err(|_| MonitorError::EnvMissing)?;
    Ok(std::path::Path::new(&runtime_dir).join(display))
}

impl SocketTransport {
    /// Opens the connection to the compositor's socket, blocking, per
    /// `$WAYLAND_DISPLAY`/`$XDG_RUNTIME_DIR` resolution rules.
    pub fn connect() -> Result<Self, MonitorError> {
        let path = resolve_socket_path()?;
        let stream = UnixStream::connect(&path).map_err(MonitorError::ConnectFailed)?;
        Ok(Self { stream })
    }

    pub fn set_blocking(&self, blocking: bool) -> Result<(), MonitorError> {
        self.stream
            .set_nonblocking(!blocking)
            .map_err(MonitorError::ConnectFailed)
    }

    pub fn fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }

    /// Writes `bytes` in full, attaching `fds` as a single `SCM_RIGHTS`
    /// ancillary message when non-empty.
    pub fn send(&mut self, bytes: &[u8], fds: &[RawFd]) -> Result<(), MonitorError> {
        if fds.is_empty() {
            self.stream.write_all(bytes)?;
            return Ok(());
        }

        let iov = [IoSlice::new(bytes)];
        let cmsgs = [ControlMessage::ScmRights(fds)];
        socket::sendmsg::<UnixAddr>(
            self.stream.as_raw_fd(),
            &iov,
            &cmsgs,
            MsgFlags::empty(),
            None,
        )
        .map_err(|errno| MonitorError::Io(std::io::Error::from(errno)))?;
        Ok(())
    }

    /// Reads one buffer's worth of data plus any ancillary fds. A
    /// `WouldBlock` condition (nothing buffered) maps to an empty result
    /// rather than an error.
    pub fn receive(&mut self) -> Result<(Vec<u8>, Vec<RawFd>), MonitorError> {
        let mut buf = [0u8; RECV_BUF_LEN];
        let mut iov = [IoSliceMut::new(&mut buf)];
        let mut cmsg_space = nix::cmsg_space!([RawFd; MAX_RECV_FDS]);

        let msg = match socket::recvmsg::<UnixAddr>(
            self.stream.as_raw_fd(),
            &mut iov,
            Some(&mut cmsg_space),
            MsgFlags::empty(),
        ) {
            Ok(msg) => msg,
            Err(nix::errno::Errno::EAGAIN) => return Ok((Vec::new(), Vec::new())),
            Err(errno) => return Err(MonitorError::Io(std::io::Error::from(errno))),
        };

        if msg.bytes == 0 {
            return Err(MonitorError::ConnectionLost);
        }

        let mut fds = Vec::new();
        for cmsg in msg.cmsgs().map_err(|errno| MonitorError::Io(std::io::Error::from(errno)))? {
            if let ControlMessageOwned::ScmRights(received) = cmsg {
                fds.extend(received);
            }
        }
        let received = msg.bytes;

        Ok((buf[..received].to_vec(), fds))
    }
}
