// src/randr.rs

//! Thin unsafe layer over the XRandR extension.
//!
//! Everything here is a direct, blocking request/response exchange with the
//! server. Per-call allocations (`XRRScreenResources`) are owned by a drop
//! guard so they are released on every exit path; the size and rotation
//! queries return library-owned memory that is copied out immediately.

use crate::connection::Connection;
use bitflags::bitflags;
use libc::c_int;
use log::trace;
use serde::Serialize;
use std::slice;
use x11::{xlib, xrandr};

bitflags! {
    /// Screen rotation and reflection state, mirroring the `RR_Rotate_*`
    /// and `RR_Reflect_*` bits of the XRandR protocol.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rotation: u16 {
        const ROTATE_0 = 1;
        const ROTATE_90 = 2;
        const ROTATE_180 = 4;
        const ROTATE_270 = 8;
        const REFLECT_X = 16;
        const REFLECT_Y = 32;
    }
}

impl Rotation {
    /// Whether the screen is turned a quarter turn either way, i.e. its
    /// width and height are swapped relative to the unrotated mode.
    pub fn is_quarter_turn(self) -> bool {
        self.intersects(Rotation::ROTATE_90 | Rotation::ROTATE_270)
    }
}

/// One mode a screen can be driven at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mode {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Vertical refresh rate in Hz; 0.0 for modes with a zero timing total.
    pub refresh: f32,
}

impl From<&xrandr::XRRModeInfo> for Mode {
    fn from(info: &xrandr::XRRModeInfo) -> Self {
        Mode {
            width: info.width,
            height: info.height,
            refresh: mode_refresh(info.dotClock as u64, info.hTotal, info.vTotal),
        }
    }
}

/// Refresh rate of a mode: `dot_clock / (h_total * v_total)`.
///
/// A zero horizontal or vertical total marks a placeholder rather than a
/// real mode; it yields exactly 0.0 instead of dividing by zero.
pub fn mode_refresh(dot_clock: u64, h_total: u32, v_total: u32) -> f32 {
    if h_total != 0 && v_total != 0 {
        dot_clock as f32 / (h_total as f32 * v_total as f32)
    } else {
        0.0
    }
}

/// Owns an `XRRScreenResources` allocation for the duration of one query.
struct ScreenResources {
    ptr: *mut xrandr::XRRScreenResources,
}

impl ScreenResources {
    fn get(conn: &Connection, root: xlib::Window) -> Option<Self> {
        let ptr = unsafe { xrandr::XRRGetScreenResources(conn.display(), root) };
        if ptr.is_null() {
            None
        } else {
            Some(Self { ptr })
        }
    }

    fn modes(&self) -> &[xrandr::XRRModeInfo] {
        let res = unsafe { &*self.ptr };
        if res.modes.is_null() || res.nmode <= 0 {
            return &[];
        }
        unsafe { slice::from_raw_parts(res.modes, res.nmode as usize) }
    }
}

impl Drop for ScreenResources {
    fn drop(&mut self) {
        unsafe { xrandr::XRRFreeScreenResources(self.ptr) };
    }
}

/// Lists the modes of the screen behind `root`, in server order.
///
/// Duplicate (width, height) pairs at different refresh rates are distinct
/// modes and are preserved as such. Returns `None` when the server yields
/// no resource list for the root window.
pub(crate) fn list_modes(conn: &Connection, root: xlib::Window) -> Option<Vec<Mode>> {
    let resources = ScreenResources::get(conn, root)?;
    let modes: Vec<Mode> = resources.modes().iter().map(Mode::from).collect();
    trace!("XRRGetScreenResources: {} modes", modes.len());
    Some(modes)
}

/// First entry of the screen's supported size list.
///
/// XRandR orders the list with the active size first, so this is the
/// current resolution. Returns `None` when the server reports no sizes for
/// the screen.
pub(crate) fn current_size(conn: &Connection, screen: c_int) -> Option<(c_int, c_int)> {
    let mut nsizes: c_int = 0;
    // The returned array is owned by the library, not freed by the caller.
    let sizes = unsafe { xrandr::XRRSizes(conn.display(), screen, &mut nsizes) };
    if sizes.is_null() || nsizes <= 0 {
        return None;
    }
    let first = unsafe { &*sizes };
    Some((first.width, first.height))
}

/// Current rotation state of the screen.
pub(crate) fn current_rotation(conn: &Connection, screen: c_int) -> Rotation {
    let mut current: xrandr::Rotation = 0;
    unsafe { xrandr::XRRRotations(conn.display(), screen, &mut current) };
    Rotation::from_bits_truncate(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_is_zero_when_either_total_is_zero() {
        assert_eq!(mode_refresh(60_000_000, 0, 1000), 0.0);
        assert_eq!(mode_refresh(60_000_000, 1000, 0), 0.0);
        assert_eq!(mode_refresh(60_000_000, 0, 0), 0.0);
    }

    #[test]
    fn refresh_formula() {
        assert_eq!(mode_refresh(60_000_000, 1000, 1000), 60.0);
    }

    #[test]
    fn refresh_of_a_typical_1080p_mode() {
        // 1920x1080@60: 148.5 MHz dot clock, 2200x1125 totals.
        let refresh = mode_refresh(148_500_000, 2200, 1125);
        assert!((refresh - 60.0).abs() < 0.01, "got {}", refresh);
    }

    #[test]
    fn mode_from_xrr_mode_info() {
        let mut info: xrandr::XRRModeInfo = unsafe { std::mem::zeroed() };
        info.width = 1920;
        info.height = 1080;
        info.dotClock = 148_500_000;
        info.hTotal = 2200;
        info.vTotal = 1125;
        let mode = Mode::from(&info);
        assert_eq!(mode.width, 1920);
        assert_eq!(mode.height, 1080);
        assert!((mode.refresh - 60.0).abs() < 0.01);
    }

    #[test]
    fn quarter_turn_bits() {
        assert!(Rotation::ROTATE_90.is_quarter_turn());
        assert!(Rotation::ROTATE_270.is_quarter_turn());
        assert!(!Rotation::ROTATE_0.is_quarter_turn());
        assert!(!Rotation::ROTATE_180.is_quarter_turn());
        assert!(!(Rotation::ROTATE_180 | Rotation::REFLECT_X).is_quarter_turn());
    }

    #[test]
    fn from_bits_truncate_preserves_rotation_bits() {
        // The raw value from XRRRotations may carry bits beyond the known
        // rotation/reflection flags; truncation must keep the ones the swap
        // decision depends on.
        let raw: u16 = 0x0102; // ROTATE_90 plus an unknown high bit
        let rotation = Rotation::from_bits_truncate(raw);
        assert!(rotation.contains(Rotation::ROTATE_90));
        assert!(rotation.is_quarter_turn());
    }

    #[test]
    fn mode_serializes_with_stable_field_names() {
        let mode = Mode {
            width: 1920,
            height: 1080,
            refresh: 60.0,
        };
        let json = serde_json::to_value(mode).unwrap();
        assert_eq!(json["width"], 1920);
        assert_eq!(json["height"], 1080);
        assert_eq!(json["refresh"], 60.0);
    }
}
