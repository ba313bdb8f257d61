// src/lib.rs

//! Query X11 screens, mode lists and current resolutions through the XRandR
//! extension.
//!
//! The crate opens one connection to the default X display at startup and
//! answers three questions about it: which screens exist, which modes
//! (width, height, refresh rate) a screen supports, and which resolution a
//! screen is currently driven at. Screens are addressed with the usual X
//! display-string forms `N`, `:N`, `N.M` and `:N.M`; hostnames are not
//! supported.
//!
//! ```no_run
//! use xorg_query::{DisplayLocator, ResolutionQuery};
//!
//! let locator = DisplayLocator::open();
//! for screen in locator.screens()? {
//!     println!("{}", screen);
//! }
//! let current = locator.current_resolution(ResolutionQuery::default())?;
//! println!("{}x{}", current.width, current.height);
//! # Ok::<(), xorg_query::QueryError>(())
//! ```

pub mod connection;
pub mod error;
pub mod locator;
pub mod randr;
pub mod screen;

pub use error::QueryError;
pub use locator::{DisplayLocator, Resolution, ResolutionQuery};
pub use randr::{Mode, Rotation};
pub use screen::ScreenId;
