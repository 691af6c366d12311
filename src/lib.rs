//! `intersection_tree` indexes half-open intervals `[start, end)` and answers overlap queries.
//!
//! The index is a binary search tree keyed by interval start, where each node also records
//! the largest end in its subtree. A query descends only into subtrees whose largest end
//! reaches past the query start, so it skips whole branches that cannot overlap.
//!
//! The same structure comes in two representations behind one [`IntervalStore`] contract:
//!
//! - [`LinkedTree`]: each node is its own allocation and owns its two children.
//! - [`ArenaTree`]: all nodes are fixed records in one vector, linked by integer ids, with the
//!   vector doubling its capacity when full. Ids stay stable across growth.
//!
//! Both build the same shape for the same insertion sequence and return the same results
//! in the same order. Neither rebalances: sorted input degrades the tree into a chain and
//! queries into linear scans. Insertion, search and teardown are all iterative, so a chain
//! of any length is handled without exhausting the call stack.
//!
//! # Example
//!
//! ```rust
//! use intersection_tree::{ArenaTree, Interval, IntervalStore, LinkedTree};
//!
//! let mut linked = LinkedTree::new();
//! let mut arena = ArenaTree::new();
//! for interval in [(10, 20), (5, 8), (15, 30)] {
//!     linked.insert(interval).unwrap();
//!     arena.insert(interval).unwrap();
//! }
//! let query = Interval::new(7, 12).unwrap();
//! assert_eq!(linked.search(&query).unwrap(), arena.search(&query).unwrap());
//! assert_eq!(linked.search(&query).unwrap().len(), 2);
//! assert!(arena.insert((3, 3)).is_err());
//! ```

mod arena;
mod error;
mod index;
mod interval;
mod linked;
mod node;
mod query;
mod store;

#[cfg(test)]
mod tests;

pub use arena::{ArenaTree, DEFAULT_CAPACITY};
pub use error::{InvalidInterval, Result};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use interval::{Interval, IntoInterval};
pub use linked::LinkedTree;
pub use query::{run_queries, QueryResult};
pub use store::IntervalStore;
