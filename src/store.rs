use crate::error::Result;
use crate::interval::{Interval, IntoInterval};

/// The behaviour shared by [`LinkedTree`](crate::LinkedTree) and [`ArenaTree`](crate::ArenaTree).
///
/// Both implementations build the same tree shape for the same insertion sequence, so
/// every query returns the same intervals in the same order on either representation.
///
/// No implementation synchronizes internally. `insert` needs `&mut self`, which already
/// rules out concurrent readers; shared `&self` searches may run from several threads
/// once the store is populated.
pub trait IntervalStore<T> {
    /// Insert an interval into the store.
    ///
    /// Duplicates are kept: inserting the same interval twice stores it twice.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`](crate::InvalidInterval) when `start >= end`. Nothing is
    /// written in that case.
    fn insert<I: IntoInterval<T>>(&mut self, interval: I) -> Result<()>;

    /// Find every stored interval `d` with `d.start < query.end && query.start < d.end`.
    ///
    /// Results come in pre-order (node, left subtree, right subtree) and are not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`](crate::InvalidInterval) when `query.start >= query.end`,
    /// whatever the store contains.
    fn search<Q: IntoInterval<T>>(&self, query: Q) -> Result<Vec<&Interval<T>>>;

    /// Return the number of intervals in the store.
    fn len(&self) -> usize;

    /// Return `true` if the store contains no intervals.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the tree as indented text, one node per line, for diagnostics.
    ///
    /// The format is not stable and must not be parsed.
    fn dump(&self) -> String;

    /// Insert every interval of `intervals` in order, stopping at the first invalid one.
    ///
    /// Intervals before the invalid one stay inserted.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidInterval`](crate::InvalidInterval) of the first rejected interval.
    fn insert_all<I, It>(&mut self, intervals: It) -> Result<()>
    where
        I: IntoInterval<T>,
        It: IntoIterator<Item = I>,
    {
        for interval in intervals {
            self.insert(interval)?;
        }
        Ok(())
    }
}
