//! Errors reported by the interval stores.

use thiserror::Error;

/// Result type alias using [`InvalidInterval`].
pub type Result<T> = std::result::Result<T, InvalidInterval>;

/// An interval whose start is not strictly less than its end.
///
/// Raised by [`Interval::new`](crate::Interval::new) and therefore by every store
/// operation that accepts an interval, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("invalid interval [{start}, {end}): start must be less than end")]
pub struct InvalidInterval {
    /// Rendered start bound
    pub start: String,
    /// Rendered end bound
    pub end: String,
}

impl InvalidInterval {
    pub(crate) fn new<T: std::fmt::Debug>(start: &T, end: &T) -> Self {
        Self {
            start: format!("{start:?}"),
            end: format!("{end:?}"),
        }
    }
}
