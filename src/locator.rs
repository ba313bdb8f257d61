// src/locator.rs

//! The public query surface.
//!
//! [`DisplayLocator`] owns the process-wide X connection and exposes the
//! callable operations: `display_string`, `screens`, `resolutions` and
//! `current_resolution`. The connection is opened once and never mutated
//! afterwards; all per-call resources are scoped to the call that acquired
//! them.

use crate::connection::Connection;
use crate::error::QueryError;
use crate::randr;
use crate::randr::{Mode, Rotation};
use crate::screen::{parse_display, ScreenId};
use log::{debug, warn};
use serde::Serialize;
use x11::xlib;

/// The active (width, height) of a screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

impl Resolution {
    /// Swaps the axes when the caller asked for the rotated view and the
    /// screen is turned a quarter turn; otherwise returns the unrotated
    /// size from the server's size list unchanged.
    fn oriented(self, rotation: Rotation, use_rotation: bool) -> Self {
        if use_rotation && rotation.is_quarter_turn() {
            Resolution {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }
}

/// Optional parameters for [`DisplayLocator::current_resolution`].
///
/// `Default` yields the documented defaults: the connection's own screen,
/// rotation-unaware.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionQuery<'a> {
    /// Target screen identifier; `None` targets the connection's current
    /// screen.
    pub screen: Option<&'a str>,
    /// When set, 90°/270° screens report swapped width and height.
    pub use_rotation: bool,
}

/// Owns the process-wide X connection and answers display queries.
///
/// Construct once with [`open`](Self::open) and share by reference. If the
/// connection could not be established, the locator still constructs; every
/// query then fails with [`QueryError::ConnectionUnavailable`]. There is no
/// retry and no lazy reopen.
#[derive(Debug)]
pub struct DisplayLocator {
    conn: Option<Connection>,
}

impl DisplayLocator {
    /// Opens the default X display.
    ///
    /// A failed open is not fatal here; it is reported by each subsequent
    /// query instead.
    pub fn open() -> Self {
        let conn = match Connection::open_default() {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("display queries will be unavailable: {}", e);
                None
            }
        };
        Self { conn }
    }

    fn conn(&self) -> Result<&Connection, QueryError> {
        self.conn.as_ref().ok_or(QueryError::ConnectionUnavailable)
    }

    /// Parses an identifier against this connection's defaults.
    fn parse(conn: &Connection, input: Option<&str>) -> Result<ScreenId, QueryError> {
        parse_display(input, &conn.display_string(), conn.default_screen())
    }

    /// Range-checks a parsed screen index against the live connection and
    /// resolves its root window.
    ///
    /// This is the adopted validation contract: the shared connection is
    /// already open, so an unresolvable screen means an invalid index, not
    /// an unreachable server.
    fn resolve_root(conn: &Connection, id: ScreenId) -> Result<xlib::Window, QueryError> {
        if id.screen < 0 || id.screen >= conn.screen_count() {
            return Err(QueryError::Resolve(id.to_string()));
        }
        let root = conn.root_window(id.screen);
        if root == 0 {
            return Err(QueryError::Resolve(id.to_string()));
        }
        Ok(root)
    }

    /// The canonical string identifying the connection in use.
    ///
    /// # Errors
    ///
    /// [`QueryError::ConnectionUnavailable`] if no connection was
    /// established at startup.
    pub fn display_string(&self) -> Result<String, QueryError> {
        Ok(self.conn()?.display_string())
    }

    /// Lists all screens of the display as normalized `:D.S` identifiers,
    /// screen index ascending from 0.
    pub fn screens(&self) -> Result<Vec<String>, QueryError> {
        let conn = self.conn()?;
        let id = Self::parse(conn, None)?;
        let count = conn.screen_count();
        debug!("display {} has {} screen(s)", id.display, count);
        Ok((0..count)
            .map(|screen| {
                ScreenId {
                    display: id.display,
                    screen,
                }
                .to_string()
            })
            .collect())
    }

    /// Lists every mode the given screen supports, in the order the server
    /// reports them.
    ///
    /// Duplicate (width, height) pairs at different refresh rates stay
    /// distinct; nothing is re-sorted or de-duplicated. Defaults to the
    /// connection's current screen when `screen` is `None`.
    ///
    /// # Errors
    ///
    /// [`QueryError::ConnectionUnavailable`] without a connection,
    /// [`QueryError::Parse`] for a malformed identifier, and
    /// [`QueryError::Resolve`] when the screen does not exist on this
    /// display. A parse failure never reaches the server.
    pub fn resolutions(&self, screen: Option<&str>) -> Result<Vec<Mode>, QueryError> {
        let conn = self.conn()?;
        let id = Self::parse(conn, screen)?;
        let root = Self::resolve_root(conn, id)?;
        randr::list_modes(conn, root).ok_or_else(|| QueryError::Resolve(id.to_string()))
    }

    /// The resolution the screen is currently driven at.
    ///
    /// Takes the first entry of the server's size list, which XRandR orders
    /// with the active size first. With `use_rotation` set, a screen
    /// rotated 90° or 270° reports swapped width and height.
    ///
    /// # Errors
    ///
    /// Same conditions as [`resolutions`](Self::resolutions); malformed
    /// identifiers fail with [`QueryError::Parse`] rather than falling
    /// back to a stale target.
    pub fn current_resolution(&self, query: ResolutionQuery<'_>) -> Result<Resolution, QueryError> {
        let conn = self.conn()?;
        let id = Self::parse(conn, query.screen)?;
        Self::resolve_root(conn, id)?;
        let (width, height) = randr::current_size(conn, id.screen)
            .ok_or_else(|| QueryError::Resolve(id.to_string()))?;
        let rotation = randr::current_rotation(conn, id.screen);
        debug!(
            "screen {}: size {}x{}, rotation {:?}",
            id, width, height, rotation
        );
        Ok(Resolution { width, height }.oriented(rotation, query.use_rotation))
    }
}
