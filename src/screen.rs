// src/screen.rs

//! Display identifier parsing and normalization.
//!
//! A caller addresses a screen with a display string in one of four forms:
//!
//! - `N`    — display N, default screen
//! - `:N`   — display N, default screen
//! - `N.M`  — display N, screen M
//! - `:N.M` — display N, screen M
//!
//! Parsing is pure: the only ambient inputs are the connection's own
//! canonical display string (used when no identifier is supplied) and its
//! default screen number, both fixed for the process lifetime. Hostnames
//! and other X display-string extensions are not accepted.

use crate::error::QueryError;
use std::fmt;

/// A fully resolved (display index, screen index) pair.
///
/// Only produced by a successful parse, never partially valid. The display
/// index is informational; queries address the local connection by screen
/// index alone. Formatting yields the canonical `:N.M` form, so
/// `id.to_string()` is the normalized identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenId {
    pub display: i32,
    pub screen: i32,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}.{}", self.display, self.screen)
    }
}

/// Parses a display identifier, falling back to the connection's own
/// canonical string when `input` is absent or empty.
///
/// The fallback string was itself produced by [`ScreenId`]'s formatting, so
/// it always parses; resolving the default is a plain two-step substitution,
/// not recursion.
///
/// # Errors
///
/// [`QueryError::Parse`] carrying the offending string when no display
/// index can be scanned.
pub fn parse_display(
    input: Option<&str>,
    default_display: &str,
    default_screen: i32,
) -> Result<ScreenId, QueryError> {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => default_display,
    };
    parse_parts(raw, default_screen).ok_or_else(|| QueryError::Parse(raw.to_string()))
}

/// The single grammar routine behind [`parse_display`].
///
/// Strips one leading `:`, scans the display index, then an optional
/// `.`-separated screen index. Text trailing a successful scan is ignored,
/// matching `sscanf("%d.%d")` semantics; `"1."` and `"1x"` both parse as
/// display 1 with the default screen.
fn parse_parts(s: &str, default_screen: i32) -> Option<ScreenId> {
    let s = s.strip_prefix(':').unwrap_or(s);
    let (display, rest) = scan_index(s)?;
    let screen = match rest.strip_prefix('.').and_then(scan_index) {
        Some((screen, _)) => screen,
        None => default_screen,
    };
    Some(ScreenId { display, screen })
}

/// Scans a leading run of ASCII digits as a non-negative index, returning
/// the value and the unconsumed remainder.
fn scan_index(s: &str) -> Option<(i32, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_DISPLAY: &str = ":0.0";
    const DEFAULT_SCREEN: i32 = 0;

    fn parse(input: Option<&str>) -> Result<ScreenId, QueryError> {
        parse_display(input, DEFAULT_DISPLAY, DEFAULT_SCREEN)
    }

    #[test]
    fn bare_display_index_uses_default_screen() {
        assert_eq!(parse(Some("2")).unwrap(), ScreenId { display: 2, screen: 0 });
    }

    #[test]
    fn colon_prefixed_display_uses_default_screen() {
        assert_eq!(parse(Some(":2")).unwrap(), ScreenId { display: 2, screen: 0 });
    }

    #[test]
    fn display_dot_screen() {
        assert_eq!(parse(Some("1.3")).unwrap(), ScreenId { display: 1, screen: 3 });
    }

    #[test]
    fn colon_prefixed_display_dot_screen() {
        assert_eq!(parse(Some(":1.3")).unwrap(), ScreenId { display: 1, screen: 3 });
    }

    #[test]
    fn absent_input_parses_the_connection_string() {
        assert_eq!(parse(None).unwrap(), ScreenId { display: 0, screen: 0 });
    }

    #[test]
    fn empty_input_parses_the_connection_string() {
        assert_eq!(parse(Some("")).unwrap(), ScreenId { display: 0, screen: 0 });
    }

    #[test]
    fn nonzero_default_screen_is_honored() {
        let id = parse_display(Some(":1"), ":1.2", 2).unwrap();
        assert_eq!(id, ScreenId { display: 1, screen: 2 });
    }

    #[test]
    fn non_numeric_input_is_rejected_with_the_offending_string() {
        let err = parse(Some("bad-string")).unwrap_err();
        assert_eq!(err, QueryError::Parse("bad-string".to_string()));
        assert!(err.to_string().contains("bad-string"));
    }

    #[test]
    fn lone_colon_is_rejected() {
        assert_eq!(parse(Some(":")).unwrap_err(), QueryError::Parse(":".to_string()));
    }

    #[test]
    fn hostnames_are_rejected() {
        assert!(matches!(parse(Some("localhost:0")), Err(QueryError::Parse(_))));
    }

    #[test]
    fn trailing_dot_falls_back_to_default_screen() {
        assert_eq!(parse(Some("1.")).unwrap(), ScreenId { display: 1, screen: 0 });
    }

    #[test]
    fn trailing_garbage_after_display_is_ignored() {
        assert_eq!(parse(Some("1.x")).unwrap(), ScreenId { display: 1, screen: 0 });
    }

    #[test]
    fn trailing_garbage_after_screen_is_ignored() {
        assert_eq!(parse(Some("1.2abc")).unwrap(), ScreenId { display: 1, screen: 2 });
    }

    #[test]
    fn negative_indices_are_rejected() {
        assert!(matches!(parse(Some("-1")), Err(QueryError::Parse(_))));
        assert!(matches!(parse(Some(":-1.0")), Err(QueryError::Parse(_))));
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in [":3.1", "3.1", ":3", "3"] {
            let once = parse(Some(input)).unwrap().to_string();
            let twice = parse(Some(once.as_str())).unwrap().to_string();
            assert_eq!(once, twice);
        }
        assert_eq!(parse(Some("3.1")).unwrap().to_string(), ":3.1");
    }

    #[test]
    fn parsing_is_deterministic() {
        let a = parse(Some(":5.2")).unwrap();
        let b = parse(Some(":5.2")).unwrap();
        assert_eq!(a, b);
    }
}
