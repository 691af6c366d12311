use std::fmt::{self, Debug};

use crate::error::Result;
use crate::interval::{Interval, IntoInterval};
use crate::store::IntervalStore;

/// Node of the linked tree, owning both of its subtrees
pub(crate) struct Node<T> {
    /// Interval of the node
    pub(crate) interval: Interval<T>,
    /// Max end value over the subtree rooted at this node
    pub(crate) max_end: T,
    /// Left subtree, every start is less than `interval.start`
    pub(crate) left: Option<Box<Node<T>>>,
    /// Right subtree, every start is greater than or equal to `interval.start`
    pub(crate) right: Option<Box<Node<T>>>,
}

impl<T: Clone> Node<T> {
    fn leaf(interval: Interval<T>) -> Box<Self> {
        Box::new(Node {
            max_end: interval.end().clone(),
            interval,
            left: None,
            right: None,
        })
    }
}

impl<T: Ord> Node<T> {
    /// The child, if it exists and may hold an interval ending after `start`
    fn reaching<'a>(child: &'a Option<Box<Self>>, start: &T) -> Option<&'a Self> {
        child.as_deref().filter(|c| &c.max_end >= start)
    }
}

/// An intersection tree made of individually allocated nodes.
///
/// The tree owns its root and every node owns its children; there are no parent links.
/// Like [`ArenaTree`](crate::ArenaTree), it never rebalances, and every traversal,
/// including teardown, uses an explicit stack instead of recursion.
pub struct LinkedTree<T> {
    /// Root of the tree
    pub(crate) root: Option<Box<Node<T>>>,
    /// Number of intervals in the tree
    pub(crate) len: usize,
}

impl<T> LinkedTree<T> {
    /// Create an empty `LinkedTree`
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        LinkedTree { root: None, len: 0 }
    }

    /// Length of the longest root-to-leaf path, 0 for an empty tree.
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{IntervalStore, LinkedTree};
    ///
    /// let mut tree = LinkedTree::new();
    /// tree.insert_all((0..10).map(|i| (i, i + 1))).unwrap();
    /// // sorted input degenerates into a chain
    /// assert_eq!(tree.height(), 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> = self.root.iter().map(|n| (&**n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }
}

impl<T> Default for LinkedTree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedTree<T> {
    fn drop(&mut self) {
        // The derived drop would recurse once per level of a degenerate chain.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> IntervalStore<T> for LinkedTree<T>
where
    T: Ord + Clone + Debug,
{
    /// Insert an interval into the tree.
    ///
    /// # Panics
    ///
    /// This method panics when the node count would no longer fit in a `usize`
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{IntervalStore, LinkedTree};
    ///
    /// let mut tree = LinkedTree::new();
    /// tree.insert((1, 3)).unwrap();
    /// tree.insert((1, 3)).unwrap();
    /// assert!(tree.insert((3, 1)).is_err());
    /// assert_eq!(tree.len(), 2);
    /// ```
    fn insert<I: IntoInterval<T>>(&mut self, interval: I) -> Result<()> {
        let interval = interval.into_interval()?;
        assert!(self.len < usize::MAX, "Reached maximum number of nodes");
        let mut link = &mut self.root;
        loop {
            match link {
                Some(node) => {
                    if interval.end() > &node.max_end {
                        node.max_end = interval.end().clone();
                    }
                    link = if interval.start() < node.interval.start() {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
                None => {
                    *link = Some(Node::leaf(interval));
                    break;
                }
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Find all intervals in the tree that overlap with the given interval.
    ///
    /// # Example
    /// ```rust
    /// use intersection_tree::{IntervalStore, LinkedTree};
    ///
    /// let mut tree = LinkedTree::new();
    /// tree.insert((10, 20)).unwrap();
    /// assert!(tree.search((25, 30)).unwrap().is_empty());
    /// assert_eq!(tree.search((15, 25)).unwrap().len(), 1);
    /// assert!(tree.search((30, 30)).is_err());
    /// ```
    fn search<Q: IntoInterval<T>>(&self, query: Q) -> Result<Vec<&Interval<T>>> {
        let query = query.into_interval()?;
        let mut list = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.interval.overlaps(&query) {
                list.push(&node.interval);
            }
            // right goes below left so the walk stays pre-order
            stack.extend(Node::reaching(&node.right, query.start()));
            stack.extend(Node::reaching(&node.left, query.start()));
        }
        Ok(list)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn dump(&self) -> String {
        self.to_string()
    }
}

impl<T: Debug> fmt::Display for LinkedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_deref() else {
            return f.write_str("Empty tree\n");
        };
        let mut stack = vec![(root, 0)];
        while let Some((node, depth)) = stack.pop() {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            writeln!(
                f,
                "[{:?}, {:?}) (max_end={:?})",
                node.interval.start(),
                node.interval.end(),
                node.max_end
            )?;
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
        }
        Ok(())
    }
}

impl<T: Debug> Debug for LinkedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedTree")
            .field("root", &self.root.as_ref().map(|n| &n.interval))
            .field("len", &self.len)
            .finish()
    }
}
