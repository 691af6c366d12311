use std::fmt::{self, Debug};

use crate::error::Result;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::{Interval, IntoInterval};
use crate::node::Record;
use crate::store::IntervalStore;

/// Capacity of an `ArenaTree` built with [`ArenaTree::new`].
pub const DEFAULT_CAPACITY: usize = 1000;

/// Largest number of records reserved eagerly for a capacity hint.
const PREALLOC_LIMIT: usize = 1 << 16;

/// An intersection tree whose nodes live in one growable vector of fixed records.
///
/// Records are addressed by dense ids handed out in insertion order. Ids are never
/// reused or moved, so a [`NodeIndex`] stays valid for the lifetime of the tree, across
/// any number of capacity doublings.
///
/// The tree is never rebalanced: its shape is decided by insertion order alone, and
/// sorted input produces a chain whose height equals the number of records. All
/// traversals use an explicit stack, so such a chain is slow to query but safe.
#[derive(Debug)]
pub struct ArenaTree<T, Ix = DefaultIx> {
    /// Vector that stores records, `records[id]` is the record with that id
    pub(crate) records: Vec<Record<T, Ix>>,
    /// Root of the tree, `NodeIndex::end()` when empty
    pub(crate) root: NodeIndex<Ix>,
    /// Number of records that fit before the next doubling
    capacity: usize,
}

impl<T, Ix> ArenaTree<T, Ix>
where
    T: Ord + Clone,
    Ix: IndexType,
{
    /// Creates a new `ArenaTree` with room for `capacity` records, addressed by ids of type `Ix`.
    ///
    /// The width of `Ix` bounds how many records the tree can ever hold. At most
    /// 65536 records are reserved up front; a larger hint is filled in lazily.
    #[inline]
    #[must_use]
    pub fn with_index(capacity: usize) -> Self {
        ArenaTree {
            records: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            root: NodeIndex::end(),
            capacity,
        }
    }

    /// Number of records the tree holds before its storage doubles.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Id of the root record, `None` if the tree is empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeIndex<Ix>> {
        (!self.root.is_end()).then_some(self.root)
    }

    /// Return the interval stored under `id`.
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{ArenaTree, IntervalStore, Interval, NodeIndex};
    ///
    /// let mut tree = ArenaTree::new();
    /// tree.insert((5, 9)).unwrap();
    /// tree.insert((1, 3)).unwrap();
    /// assert_eq!(tree.get(NodeIndex::new(1)), Some(&Interval::new(1, 3).unwrap()));
    /// assert_eq!(tree.get(NodeIndex::new(2)), None);
    /// ```
    #[inline]
    pub fn get(&self, id: NodeIndex<Ix>) -> Option<&Interval<T>> {
        self.records.get(id.index()).map(Record::interval)
    }

    /// Return the max end value of the subtree rooted at `id`.
    #[inline]
    pub fn max_end(&self, id: NodeIndex<Ix>) -> Option<&T> {
        self.records.get(id.index()).map(Record::max_end)
    }

    /// Length of the longest root-to-leaf path, 0 for an empty tree.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if !self.root.is_end() {
            stack.push((self.root, 1));
        }
        while let Some((x, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [self.node_ref(x, Record::left), self.node_ref(x, Record::right)] {
                if !child.is_end() {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }
}

impl<T> ArenaTree<T>
where
    T: Ord + Clone,
{
    /// Create an empty `ArenaTree` with [`DEFAULT_CAPACITY`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_index(DEFAULT_CAPACITY)
    }

    /// Creates a new `ArenaTree` with room for `capacity` records.
    ///
    /// The hint only affects when the backing storage grows, never what a query returns.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_index(capacity)
    }
}

impl<T> Default for ArenaTree<T>
where
    T: Ord + Clone,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Ix> IntervalStore<T> for ArenaTree<T, Ix>
where
    T: Ord + Clone + Debug,
    Ix: IndexType,
{
    /// Insert an interval into the tree.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of records for its index
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{ArenaTree, IntervalStore};
    ///
    /// let mut tree = ArenaTree::with_capacity(1);
    /// tree.insert((1, 3)).unwrap();
    /// tree.insert((2, 4)).unwrap();
    /// assert!(tree.insert((4, 4)).is_err());
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.capacity(), 2);
    /// ```
    #[inline]
    fn insert<I: IntoInterval<T>>(&mut self, interval: I) -> Result<()> {
        let interval = interval.into_interval()?;
        let z = self.allocate(interval);
        self.insert_inner(z);
        Ok(())
    }

    /// Find all intervals in the tree that overlap with the given interval.
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{ArenaTree, IntervalStore};
    ///
    /// let mut tree = ArenaTree::new();
    /// tree.insert_all([(1, 3), (2, 4), (6, 7), (7, 11)]).unwrap();
    /// assert_eq!(tree.search((2, 7)).unwrap().len(), 3);
    /// assert!(tree.search((4, 6)).unwrap().is_empty());
    /// ```
    fn search<Q: IntoInterval<T>>(&self, query: Q) -> Result<Vec<&Interval<T>>> {
        let query = query.into_interval()?;
        let mut list = Vec::new();
        let mut stack = Vec::new();
        if !self.root.is_end() {
            stack.push(self.root);
        }
        while let Some(p) = stack.pop() {
            if self.node_ref(p, Record::interval).overlaps(&query) {
                list.push(self.node_ref(p, Record::interval));
            }
            // right goes below left so the walk stays pre-order
            let p_right = self.node_ref(p, Record::right);
            if self.reaches(p_right, query.start()) {
                stack.push(p_right);
            }
            let p_left = self.node_ref(p, Record::left);
            if self.reaches(p_left, query.start()) {
                stack.push(p_left);
            }
        }
        Ok(list)
    }

    #[inline]
    fn len(&self) -> usize {
        self.records.len()
    }

    fn dump(&self) -> String {
        self.to_string()
    }
}

impl<T, Ix> ArenaTree<T, Ix>
where
    T: Ord + Clone,
    Ix: IndexType,
{
    /// Write a new leaf record into the next unused slot and return its id.
    fn allocate(&mut self, interval: Interval<T>) -> NodeIndex<Ix> {
        let z = NodeIndex::new(self.records.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || !z.is_end(),
            "Reached maximum number of nodes"
        );
        if self.records.len() == self.capacity {
            self.grow();
        }
        self.records.push(Record::leaf(interval));
        z
    }

    /// Double the capacity. Existing records keep their ids.
    fn grow(&mut self) {
        let old = self.capacity;
        self.capacity = old.saturating_mul(2).max(1);
        self.records.reserve_exact(self.capacity - self.records.len());
        log::debug!("arena tree grown from {old} to {} records", self.capacity);
    }

    /// Link the already allocated record `z` below its parent, covering its end on the way down.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        if self.root.is_end() {
            self.root = z;
            return;
        }
        let start = self.node_ref(z, Record::start).clone();
        let end = self.node_ref(z, Record::interval).end().clone();
        let mut x = self.root;
        loop {
            self.node_mut(x, Record::cover(&end));
            if start < *self.node_ref(x, Record::start) {
                let x_left = self.node_ref(x, Record::left);
                if x_left.is_end() {
                    self.node_mut(x, Record::set_left(z));
                    return;
                }
                x = x_left;
            } else {
                let x_right = self.node_ref(x, Record::right);
                if x_right.is_end() {
                    self.node_mut(x, Record::set_right(z));
                    return;
                }
                x = x_right;
            }
        }
    }

    /// Whether the subtree at `x` exists and may hold an interval ending after `start`
    fn reaches(&self, x: NodeIndex<Ix>, start: &T) -> bool {
        !x.is_end() && self.node_ref(x, Record::max_end) >= start
    }
}

// Convenient methods for reference or mutate a record
impl<'a, T, Ix> ArenaTree<T, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Record<T, Ix>) -> R,
    {
        op(&self.records[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Record<T, Ix>) -> R,
    {
        op(&mut self.records[node.index()])
    }
}

impl<T, Ix> fmt::Display for ArenaTree<T, Ix>
where
    T: Ord + Clone + Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_end() {
            return f.write_str("Empty tree\n");
        }
        let mut stack = vec![(self.root, 0)];
        while let Some((x, depth)) = stack.pop() {
            let record = self.node_ref(x, |r| r);
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            writeln!(
                f,
                "[{:?}, {:?}) (max_end={:?}) @{}",
                record.interval.start(),
                record.interval.end(),
                record.max_end,
                x.index()
            )?;
            if !record.right.is_end() {
                stack.push((record.right, depth + 1));
            }
            if !record.left.is_end() {
                stack.push((record.left, depth + 1));
            }
        }
        Ok(())
    }
}
