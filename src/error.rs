//! Error taxonomy (spec §7).
//!
//! Two error conditions are modeled:
//!
//! - [`Error::InvalidOperation`] — a structurally illegal tree mutation or an
//!   attempt to focus a non-focusable view.
//! - [`Error::LayoutInconsistency`] — a spanning cell computed a sub-canvas
//!   smaller than its child's declared minimum size. This is a
//!   programming-error-level internal consistency failure that should be
//!   surfaced loudly rather than silently clipped.
//!
//! All other operations (event dispatch, value changes, focus traversal at
//! tree edges) are total functions returning a boolean/no-op outcome rather
//! than raising.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An illegal operation was attempted: focusing a non-focusable view, or
    /// any structurally illegal tree mutation (e.g. grid coordinates out of
    /// range).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A spanning cell computed a sub-canvas smaller than its child's declared
    /// minimum size — an internal layout consistency failure.
    #[error("layout inconsistency: {0}")]
    LayoutInconsistency(String),
}

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
