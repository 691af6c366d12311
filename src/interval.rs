//! The `Interval` stored in the trees represents the half-open range [start, end).
//!
//! Intervals are ordered by `start`, then by `end`. For instance, with intervals of type `Interval<u32>`:
//! - [1,4)<[2,5), because 1<2
//! - [1,4)<[1,5), because 4<5
//!
//! Both trees are keyed by `start` only, so this ordering is a convenience for callers
//! that need to sort query results.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInterval, Result};

/// The interval stored in the trees, representing [start, end) with `start < end`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "(T, T)",
        into = "(T, T)",
        bound(
            serialize = "T: Clone + Serialize",
            deserialize = "T: Ord + fmt::Debug + Deserialize<'de>"
        )
    )
)]
pub struct Interval<T> {
    /// Start value, inclusive
    start: T,
    /// End value, exclusive
    end: T,
}

impl<T: Ord + fmt::Debug> Interval<T> {
    /// Create a new `Interval`
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] when `start >= end`; a single point is not an interval.
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::Interval;
    ///
    /// assert!(Interval::new(1, 2).is_ok());
    /// assert!(Interval::new(2, 2).is_err());
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Result<Self> {
        if start >= end {
            log::trace!("rejecting interval [{start:?}, {end:?})");
            return Err(InvalidInterval::new(&start, &end));
        }
        Ok(Self { start, end })
    }
}

impl<T: Ord> Interval<T> {
    /// Checks if self overlaps with other interval
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl<T> Interval<T> {
    /// Start value
    #[inline]
    pub fn start(&self) -> &T {
        &self.start
    }

    /// End value
    #[inline]
    pub fn end(&self) -> &T {
        &self.end
    }

    /// Consume the interval, returning `(start, end)`
    #[inline]
    pub fn into_inner(self) -> (T, T) {
        (self.start, self.end)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<T: Ord + fmt::Debug> TryFrom<(T, T)> for Interval<T> {
    type Error = InvalidInterval;

    fn try_from((start, end): (T, T)) -> Result<Self> {
        Self::new(start, end)
    }
}

impl<T> From<Interval<T>> for (T, T) {
    fn from(interval: Interval<T>) -> Self {
        interval.into_inner()
    }
}

/// Conversion into a checked [`Interval`].
///
/// Every store operation takes its interval through this trait, so raw bounds such as
/// `(10, 20)` or `10..20` are validated at the same point as already built intervals.
pub trait IntoInterval<T> {
    /// Performs the conversion
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] when the bounds do not satisfy `start < end`.
    fn into_interval(self) -> Result<Interval<T>>;
}

impl<T> IntoInterval<T> for Interval<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>> {
        Ok(self)
    }
}

impl<T: Clone> IntoInterval<T> for &Interval<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>> {
        Ok(self.clone())
    }
}

impl<T: Ord + fmt::Debug> IntoInterval<T> for (T, T) {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>> {
        Interval::new(self.0, self.1)
    }
}

impl<T: Ord + fmt::Debug> IntoInterval<T> for Range<T> {
    #[inline]
    fn into_interval(self) -> Result<Interval<T>> {
        Interval::new(self.start, self.end)
    }
}
