//! Keymap decoding: turns the fd the compositor hands over in
//! `wl_keyboard.keymap` into an ordered list of layout names.
//!
//! Two tiers, tried in order: the native libxkbcommon decoder (dlopen'd
//! once and cached for the monitor's lifetime) and a regex-based text scan
//! that needs no system library at all. The fd is always closed once the
//! keymap has been read, on every exit path.

mod fallback;
mod native;

use std::fs::File;
use std::os::fd::{FromRawFd, RawFd};

use memmap2::MmapOptions;

use crate::error::MonitorError;
use crate::protocol::keyboard::event::keymap::FORMAT_XKB_V1;
use native::NativeXkb;

pub struct KeymapDecoder {
    native: Option<Option<NativeXkb>>,
}

impl KeymapDecoder {
    pub fn new() -> Self {
        Self { native: None }
    }

    /// Loads the native decoder on first use and caches the outcome for the
    /// monitor's lifetime. `libxkbcommon`'s absence is a one-time event, not
    /// a per-decode one, so it's logged exactly here rather than on every
    /// call to `decode`.
    fn native_decoder(&mut self) -> Option<&NativeXkb> {
        if self.native.is_none() {
            let loaded = NativeXkb::load();
            if loaded.is_none() {
                log::warn!("{}", MonitorError::DecoderUnavailable);
            }
            self.native = Some(loaded);
        }
        self.native.as_ref().unwrap().as_ref()
    }

    /// Maps the fd read-only, decodes it, and closes the fd unconditionally
    /// before returning (including on error paths). The returned sequence
    /// is never empty on success: a decode that finds nothing still yields
    /// `["Unknown"]`.
    pub fn decode(
        &mut self,
        format: u32,
        fd: RawFd,
        size: u32,
    ) -> Result<Vec<String>, MonitorError> {
        // SAFETY: `fd` was just received as SCM_RIGHTS ancillary data for this
        // keymap event and is owned by us alone; wrapping it in a `File`
        // guarantees it's closed when this scope exits.
        let file = unsafe { File::from_raw_fd(fd) };
        let result = self.decode_file(format, &file, size);
        drop(file);
        result
    }

    fn decode_file(
        &mut self,
        format: u32,
        file: &File,
        size: u32,
    ) -> Result<Vec<String>, MonitorError> {
        if format != FORMAT_XKB_V1 {
            return Err(MonitorError::KeymapUnsupported(format));
        }

        let mmap = unsafe { MmapOptions::new().len(size as usize).map_copy_read_only(file) }?;
        let text = String::from_utf8_lossy(&mmap);
        let text = text.trim_end_matches('\0');

        if let Some(native) = self.native_decoder() {
            match native.decode(text)? {
                Some(layouts) if !layouts.is_empty() => return Ok(layouts),
                Some(_) => log::warn!("native xkb decoder produced no layouts, falling back to text scan"),
                None => log::warn!("native xkb decoder rejected the keymap, falling back to text scan"),
            }
        }

        let layouts = fallback::decode(text);
        Ok(layouts)
    }
}

impl Default for KeymapDecoder {
    fn default() -> Self {
        Self::new()
    }
}
