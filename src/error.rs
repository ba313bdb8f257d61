// src/error.rs

//! Error types for display queries.

use thiserror::Error;

/// Errors reported by [`DisplayLocator`](crate::locator::DisplayLocator)
/// operations.
///
/// The three kinds are distinguishable by callers: a connection that was
/// never established, an identifier that failed to parse, and an identifier
/// that parsed but does not resolve to a live screen. No operation retries
/// internally; every failure is surfaced as soon as it is detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The process-wide X connection was never established at startup.
    /// There is no lazy reopen; this persists for the process lifetime.
    #[error("failed to open X display")]
    ConnectionUnavailable,

    /// The supplied display identifier matched none of the accepted forms
    /// (`N`, `:N`, `N.M`, `:N.M`). Carries the offending string.
    #[error("failed to parse display `{0}`")]
    Parse(String),

    /// The parsed identifier does not resolve to a valid screen on the
    /// active connection, e.g. an out-of-range screen index. Carries the
    /// normalized identifier.
    #[error("can't open display {0}")]
    Resolve(String),
}
