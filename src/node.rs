use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;

/// Record of the arena tree: `(start, end, max_end, left, right)`
#[derive(Debug, Clone)]
pub struct Record<T, Ix> {
    /// Interval of the record
    pub interval: Interval<T>,
    /// Max end value over the subtree rooted at this record
    pub max_end: T,
    /// Left child, `NodeIndex::end()` if absent
    pub left: NodeIndex<Ix>,
    /// Right child, `NodeIndex::end()` if absent
    pub right: NodeIndex<Ix>,
}

// Convenient getter/setter methods
impl<T, Ix> Record<T, Ix>
where
    T: Clone,
    Ix: IndexType,
{
    /// Create a leaf record
    pub fn leaf(interval: Interval<T>) -> Self {
        Record {
            max_end: interval.end().clone(),
            interval,
            left: NodeIndex::end(),
            right: NodeIndex::end(),
        }
    }

    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub fn start(&self) -> &T {
        self.interval.start()
    }

    pub fn max_end(&self) -> &T {
        &self.max_end
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Record<T, Ix>) {
        move |record: &mut Record<T, Ix>| {
            record.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Record<T, Ix>) {
        move |record: &mut Record<T, Ix>| {
            record.right = right;
        }
    }
}

impl<T, Ix> Record<T, Ix>
where
    T: Ord + Clone,
    Ix: IndexType,
{
    /// Raise `max_end` so that it covers `end`
    pub fn cover(end: &T) -> impl FnOnce(&mut Record<T, Ix>) + '_ {
        move |record: &mut Record<T, Ix>| {
            if *end > record.max_end {
                record.max_end = end.clone();
            }
        }
    }
}
