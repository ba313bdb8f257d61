// src/connection.rs

//! Manages the X11 Display connection, ensuring it is closed on drop.

use crate::error::QueryError;
use libc::c_int;
use log::{debug, info, warn};
use std::ffi::CStr;
use std::ptr;
use x11::xlib;

/// An open connection to the X server.
///
/// Wraps the raw `*mut xlib::Display` pointer. The pointer is non-null for
/// the lifetime of the struct and the connection is closed when the struct
/// is dropped. Opened once per process against the default target; there is
/// no reopen and no exposed close.
#[derive(Debug)]
pub struct Connection {
    ptr: *mut xlib::Display,
    default_screen: c_int,
}

impl Connection {
    /// Attempts to open a connection to the default X server.
    ///
    /// Passing NULL to `XOpenDisplay` makes Xlib consult the `DISPLAY`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// [`QueryError::ConnectionUnavailable`] if `XOpenDisplay` returns null
    /// (no server reachable, `DISPLAY` unset or invalid).
    pub fn open_default() -> Result<Self, QueryError> {
        let ptr = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if ptr.is_null() {
            warn!("XOpenDisplay failed; check DISPLAY or X server status");
            return Err(QueryError::ConnectionUnavailable);
        }
        let default_screen = unsafe { xlib::XDefaultScreen(ptr) };
        debug!(
            "X display opened: {:p}, default screen {}",
            ptr, default_screen
        );
        Ok(Self {
            ptr,
            default_screen,
        })
    }

    /// Returns the raw X11 display pointer.
    ///
    /// # Safety
    ///
    /// The pointer is valid only while this `Connection` is alive; it must
    /// not be stored past the struct's lifetime.
    #[inline]
    pub fn display(&self) -> *mut xlib::Display {
        self.ptr
    }

    /// The default screen number of the connection.
    #[inline]
    pub fn default_screen(&self) -> c_int {
        self.default_screen
    }

    /// Number of screens on the display.
    pub fn screen_count(&self) -> c_int {
        unsafe { xlib::XScreenCount(self.ptr) }
    }

    /// The canonical string the connection was opened with, as reported by
    /// `XDisplayString` (e.g. `:0.0`).
    pub fn display_string(&self) -> String {
        // XDisplayString returns memory owned by Xlib; copy it out.
        let raw = unsafe { xlib::XDisplayString(self.ptr) };
        if raw.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(raw) }
            .to_string_lossy()
            .into_owned()
    }

    /// Root window of the given screen, or 0 if the server reports none.
    ///
    /// The screen index must already have been range-checked against
    /// [`screen_count`](Self::screen_count); Xlib indexes its screen array
    /// without bounds checks.
    pub fn root_window(&self, screen: c_int) -> xlib::Window {
        unsafe { xlib::XRootWindow(self.ptr, screen) }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        info!("closing X11 display connection: {:p}", self.ptr);
        let status = unsafe { xlib::XCloseDisplay(self.ptr) };
        if status != 0 {
            warn!("XCloseDisplay returned non-zero status: {}", status);
        }
    }
}
