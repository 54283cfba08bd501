//! Thin FFI wrapper around libxkbcommon, loaded at runtime via `dlopen`
//! rather than linked at build time — mirroring the original's
//! `ctypes.CDLL("libxkbcommon.so.0")`. If the library isn't installed this
//! simply fails to load, which the caller treats as "fall back to the
//! text-scan decoder", never as a build-time failure.

use std::ffi::{c_char, c_void, CStr, CString};

use libloading::{Library, Symbol};

use crate::error::MonitorError;

const XKB_KEYMAP_FORMAT_TEXT_V1: u32 = 1;
const XKB_CONTEXT_NO_FLAGS: u32 = 0;
const XKB_KEYMAP_COMPILE_NO_FLAGS: u32 = 0;

type ContextNewFn = unsafe extern "C" fn(u32) -> *mut c_void;
type ContextUnrefFn = unsafe extern "C" fn(*mut c_void);
type KeymapNewFromStringFn =
    unsafe extern "C" fn(*mut c_void, *const c_char, u32, u32) -> *mut c_void;
type KeymapUnrefFn = unsafe extern "C" fn(*mut c_void);
type KeymapNumLayoutsFn = unsafe extern "C" fn(*mut c_void) -> u32;
type KeymapLayoutGetNameFn = unsafe extern "C" fn(*mut c_void, u32) -> *const c_char;

/// A loaded libxkbcommon handle plus a live `xkb_context`, kept for the
/// lifetime of the monitor so a keymap change doesn't repeat the dlopen.
pub struct NativeXkb {
    _lib: Library,
    context: *mut c_void,
    context_unref: ContextUnrefFn,
    keymap_new_from_string: KeymapNewFromStringFn,
    keymap_unref: KeymapUnrefFn,
    keymap_num_layouts: KeymapNumLayoutsFn,
    keymap_layout_get_name: KeymapLayoutGetNameFn,
}

impl NativeXkb {
    /// Attempts to `dlopen` libxkbcommon and create a context. Returns
    /// `None` (rather than an error) when the library is absent or any
    /// symbol is missing: the caller degrades to the fallback decoder.
    pub fn load() -> Option<Self> {
        unsafe {
            let lib = Library::new("libxkbcommon.so.0").ok()?;
            let context_new: Symbol<ContextNewFn> = lib.get(b"xkb_context_new\0").ok()?;
            let context_unref: Symbol<ContextUnrefFn> = lib.get(b"xkb_context_unref\0").ok()?;
            let keymap_new_from_string: Symbol<KeymapNewFromStringFn> =
                lib.get(b"xkb_keymap_new_from_string\0").ok()?;
            let keymap_unref: Symbol<KeymapUnrefFn> = lib.get(b"xkb_keymap_unref\0").ok()?;
            let keymap_num_layouts: Symbol<KeymapNumLayoutsFn> =
                lib.get(b"xkb_keymap_num_layouts\0").ok()?;
            let keymap_layout_get_name: Symbol<KeymapLayoutGetNameFn> =
                lib.get(b"xkb_keymap_layout_get_name\0").ok()?;

            let context = context_new(XKB_CONTEXT_NO_FLAGS);
            if context.is_null() {
                return None;
            }

            let context_unref = *context_unref;
            let keymap_new_from_string = *keymap_new_from_string;
            let keymap_unref = *keymap_unref;
            let keymap_num_layouts = *keymap_num_layouts;
            let keymap_layout_get_name = *keymap_layout_get_name;

            Some(Self {
                _lib: lib,
                context,
                context_unref,
                keymap_new_from_string,
                keymap_unref,
                keymap_num_layouts,
                keymap_layout_get_name,
            })
        }
    }

    /// Compiles the keymap text and returns its layout names in order.
    pub fn decode(&self, keymap_text: &str) -> Result<Option<Vec<String>>, MonitorError> {
        let c_text = CString::new(keymap_text)
            .map_err(|_| MonitorError::Malformed("keymap text contains a NUL byte".to_string()))?;

        unsafe {
            let keymap = (self.keymap_new_from_string)(
                self.context,
                c_text.as_ptr(),
                XKB_KEYMAP_FORMAT_TEXT_V1,
                XKB_KEYMAP_COMPILE_NO_FLAGS,
            );
            if keymap.is_null() {
                return Ok(None);
            }

            let count = (self.keymap_num_layouts)(keymap);
            let mut names = Vec::with_capacity(count as usize);
            for i in 0..count {
                let name_ptr = (self.keymap_layout_get_name)(keymap, i);
                let name = if name_ptr.is_null() {
                    format!("Group{i}")
                } else {
                    CStr::from_ptr(name_ptr).to_string_lossy().into_owned()
                };
                names.push(name);
            }

            (self.keymap_unref)(keymap);
            Ok(Some(names))
        }
    }
}

impl Drop for NativeXkb {
    fn drop(&mut self) {
        unsafe {
            (self.context_unref)(self.context);
        }
    }
}
