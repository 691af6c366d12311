//! Batch execution of overlap queries against a populated store.

use crate::error::Result;
use crate::interval::{Interval, IntoInterval};
use crate::store::IntervalStore;

/// Every `(query, stored)` pair that overlaps, in query order.
pub type QueryResult<'a, T> = Vec<(Interval<T>, &'a Interval<T>)>;

/// Run each query against `store` and collect one `(query, match)` pair per match.
///
/// Queries are processed in input order; matches of one query keep the order
/// [`IntervalStore::search`] returned them in.
///
/// # Errors
///
/// Returns [`InvalidInterval`](crate::InvalidInterval) for the first query with
/// `start >= end`. Pairs collected for earlier queries are discarded.
///
/// # Example
/// ```rust
/// use intersection_tree::{run_queries, ArenaTree, IntervalStore};
///
/// let mut tree = ArenaTree::new();
/// tree.insert_all([(1, 5), (4, 9), (20, 30)]).unwrap();
/// let pairs = run_queries([(0, 2), (8, 25)], &tree).unwrap();
/// let rendered: Vec<_> = pairs.iter().map(|(q, d)| format!("{q} {d}")).collect();
/// assert_eq!(rendered, ["[0, 2) [1, 5)", "[8, 25) [4, 9)", "[8, 25) [20, 30)"]);
/// ```
pub fn run_queries<'a, T, S, Q, It>(queries: It, store: &'a S) -> Result<QueryResult<'a, T>>
where
    T: Clone,
    S: IntervalStore<T>,
    Q: IntoInterval<T>,
    It: IntoIterator<Item = Q>,
{
    let mut results = Vec::new();
    for query in queries {
        let query = query.into_interval()?;
        for found in store.search(&query)? {
            results.push((query.clone(), found));
        }
    }
    Ok(results)
}
