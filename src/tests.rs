use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::linked::Node;

use super::*;

struct IntervalGenerator {
    rng: StdRng,
    limit: i32,
}

impl IntervalGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 1000;
        Self {
            rng: SeedableRng::from_seed(seed),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> Interval<i32> {
        let start = self.rng.gen_range(0..self.limit - 1);
        let end = self.rng.gen_range((start + 1)..self.limit);
        Interval::new(start, end).unwrap()
    }

    fn next_with_range(&mut self, range: i32) -> Interval<i32> {
        let start = self.rng.gen_range(0..self.limit - 1);
        let end = self
            .rng
            .gen_range((start + 1)..self.limit.min(start + 1 + range));
        Interval::new(start, end).unwrap()
    }
}

/// Quadratic reference: every stored interval overlapping `query`, in insertion order
fn oracle<'a>(intervals: &'a [Interval<i32>], query: &Interval<i32>) -> Vec<&'a Interval<i32>> {
    intervals.iter().filter(|d| d.overlaps(query)).collect()
}

fn sorted<'a>(mut v: Vec<&'a Interval<i32>>) -> Vec<&'a Interval<i32>> {
    v.sort_unstable();
    v
}

impl<T: Ord + Clone> ArenaTree<T> {
    fn check_max(&self) {
        if !self.root.is_end() {
            let _ignore = self.check_max_inner(self.root);
        }
    }

    fn check_max_inner(&self, x: NodeIndex) -> T {
        let record = &self.records[x.index()];
        let mut max = record.interval.end().clone();
        for child in [record.left, record.right] {
            if !child.is_end() {
                max = max.max(self.check_max_inner(child));
            }
        }
        assert!(record.max_end == max, "stale max_end at {x:?}");
        max
    }

    /// Every start in the subtree at `x` lies in `[low, high)`
    fn check_order(&self, x: NodeIndex, low: Option<&T>, high: Option<&T>) {
        if x.is_end() {
            return;
        }
        let record = &self.records[x.index()];
        let start = record.interval.start();
        assert!(low.map_or(true, |l| start >= l));
        assert!(high.map_or(true, |h| start < h));
        self.check_order(record.left, low, Some(start));
        self.check_order(record.right, Some(start), high);
    }

    /// Every id below `len` is reachable from the root exactly once
    fn check_ids(&self) {
        let mut seen = vec![false; self.records.len()];
        let mut stack: Vec<NodeIndex> = self.root().into_iter().collect();
        while let Some(x) = stack.pop() {
            assert!(!seen[x.index()], "{x:?} reachable twice");
            seen[x.index()] = true;
            let record = &self.records[x.index()];
            stack.extend([record.left, record.right].into_iter().filter(|c| !c.is_end()));
        }
        assert!(seen.into_iter().all(|s| s));
        assert!(self.records.len() <= self.capacity());
    }

    fn check_invariants(&self) {
        self.check_max();
        self.check_order(self.root, None, None);
        self.check_ids();
    }
}

impl<T: Ord + Clone> LinkedTree<T> {
    fn check_max_inner(node: &Node<T>) -> T {
        let mut max = node.interval.end().clone();
        for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
            max = max.max(Self::check_max_inner(child));
        }
        assert!(node.max_end == max, "stale max_end");
        max
    }

    fn check_order(node: Option<&Node<T>>, low: Option<&T>, high: Option<&T>) -> usize {
        let Some(node) = node else {
            return 0;
        };
        let start = node.interval.start();
        assert!(low.map_or(true, |l| start >= l));
        assert!(high.map_or(true, |h| start < h));
        1 + Self::check_order(node.left.as_deref(), low, Some(start))
            + Self::check_order(node.right.as_deref(), Some(start), high)
    }

    fn check_invariants(&self) {
        if let Some(root) = self.root.as_deref() {
            let _ignore = Self::check_max_inner(root);
        }
        assert_eq!(Self::check_order(self.root.as_deref(), None, None), self.len);
    }
}

fn with_trees_and_generator(test_fn: impl Fn(LinkedTree<i32>, ArenaTree<i32>, IntervalGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = IntervalGenerator::new(seed);
        test_fn(LinkedTree::new(), ArenaTree::with_capacity(16), gen);
    }
}

#[test]
fn invariants_hold_after_every_insert() {
    with_trees_and_generator(|mut linked, mut arena, mut gen| {
        for _ in 0..300 {
            let interval = gen.next();
            linked.insert(&interval).unwrap();
            arena.insert(interval).unwrap();
            linked.check_invariants();
            arena.check_invariants();
        }
        assert_eq!(linked.len(), 300);
        assert_eq!(arena.len(), 300);
    });
}

#[test]
fn search_matches_oracle() {
    with_trees_and_generator(|mut linked, mut arena, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        linked.insert_all(&intervals).unwrap();
        arena.insert_all(&intervals).unwrap();
        let to_find: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(30))
            .take(1000)
            .collect();

        for query in &to_find {
            let expect = sorted(oracle(&intervals, query));
            assert_eq!(sorted(linked.search(query).unwrap()), expect);
            assert_eq!(sorted(arena.search(query).unwrap()), expect);
        }
    });
}

#[test]
fn representations_return_identical_sequences() {
    with_trees_and_generator(|mut linked, mut arena, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(50))
            .take(1000)
            .collect();
        linked.insert_all(&intervals).unwrap();
        arena.insert_all(&intervals).unwrap();
        assert_eq!(linked.dump().lines().count(), 1000);

        for _ in 0..500 {
            let query = gen.next();
            assert_eq!(linked.search(&query).unwrap(), arena.search(&query).unwrap());
        }
        assert_eq!(linked.height(), arena.height());
    });
}

#[test]
fn batch_queries_match_oracle_pairs() {
    with_trees_and_generator(|mut linked, mut arena, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(20))
            .take(200)
            .collect();
        linked.insert_all(&intervals).unwrap();
        arena.insert_all(&intervals).unwrap();
        let queries: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(20))
            .take(200)
            .collect();

        let from_linked = run_queries(&queries, &linked).unwrap();
        let from_arena = run_queries(&queries, &arena).unwrap();
        assert_eq!(from_linked, from_arena);

        let mut expect: Vec<_> = queries
            .iter()
            .flat_map(|q| oracle(&intervals, q).into_iter().map(move |d| (q.clone(), d)))
            .collect();
        let mut actual = from_arena;
        expect.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expect);
    });
}

#[test]
fn capacity_hint_does_not_change_results() {
    let mut gen = IntervalGenerator::new([7; 32]);
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(500).collect();
    let mut small = ArenaTree::with_capacity(1);
    let mut large = ArenaTree::with_capacity(4096);
    small.insert_all(&intervals).unwrap();
    large.insert_all(&intervals).unwrap();
    assert_eq!(small.capacity(), 512);
    assert_eq!(large.capacity(), 4096);
    assert_eq!(small.dump(), large.dump());
    for _ in 0..200 {
        let query = gen.next();
        assert_eq!(small.search(&query).unwrap(), large.search(&query).unwrap());
    }
}

#[test]
fn basic_contract_holds_for_both_trees() {
    fn check<S: IntervalStore<i32>>(mut store: S) {
        assert!(store.insert((10, 10)).is_err());
        assert!(store.insert((20, 10)).is_err());
        assert!(store.search((30, 30)).is_err());
        assert!(store.is_empty());

        store.insert((10, 20)).unwrap();
        assert!(store.search((25, 30)).unwrap().is_empty());
        let found = store.search((15, 25)).unwrap();
        assert_eq!(found, vec![&Interval::new(10, 20).unwrap()]);
        assert!(store.search((30, 30)).is_err());

        store.insert((10, 20)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.search((12, 13)).unwrap().len(), 2);
    }
    check(LinkedTree::new());
    check(ArenaTree::new());
}

#[test]
fn insert_all_stops_at_first_invalid() {
    let mut linked = LinkedTree::new();
    let mut arena = ArenaTree::new();
    let input = [(1, 4), (2, 9), (5, 5), (6, 8)];
    assert!(linked.insert_all(input).is_err());
    assert!(arena.insert_all(input).is_err());
    assert_eq!(linked.len(), 2);
    assert_eq!(arena.len(), 2);
    assert_eq!(linked.search((0, 100)).unwrap(), arena.search((0, 100)).unwrap());
}

#[test]
fn sorted_input_degenerates_into_a_chain() {
    const N: i32 = 1000;
    let mut linked = LinkedTree::new();
    let mut arena = ArenaTree::new();
    for i in 0..N {
        linked.insert((i, i + 2)).unwrap();
        arena.insert((i, i + 2)).unwrap();
    }
    assert_eq!(linked.height(), N as usize);
    assert_eq!(arena.height(), N as usize);
    linked.check_invariants();
    arena.check_invariants();

    let (a, b) = (Interval::new(N - 3, N - 1).unwrap(), Interval::new(N - 2, N).unwrap());
    let expect = vec![&a, &b];
    assert_eq!(linked.search((N - 2, N - 1)).unwrap(), expect);
    assert_eq!(arena.search((N - 2, N - 1)).unwrap(), expect);
}

#[test]
fn negative_and_wide_bounds() {
    let mut linked = LinkedTree::new();
    let mut arena = ArenaTree::<i64>::new();
    let input = [(-50, -10), (i64::MIN, 0), (0, i64::MAX), (-10, 10)];
    linked.insert_all(input).unwrap();
    arena.insert_all(input).unwrap();
    let query = (-10, -9);
    let (a, b) = (Interval::new(i64::MIN, 0).unwrap(), Interval::new(-10, 10).unwrap());
    let expect = sorted_i64(vec![&a, &b]);
    assert_eq!(sorted_i64(linked.search(query).unwrap()), expect);
    assert_eq!(sorted_i64(arena.search(query).unwrap()), expect);
}

fn sorted_i64(mut v: Vec<&Interval<i64>>) -> Vec<&Interval<i64>> {
    v.sort_unstable();
    v
}

fn arbitrary_interval() -> impl Strategy<Value = Interval<i32>> {
    // A small value domain encourages ties and duplicates.
    (0..200i32, 1..40i32).prop_map(|(start, len)| Interval::new(start, start + len).unwrap())
}

proptest! {
    #[test]
    fn prop_search_matches_oracle(
        intervals in prop::collection::vec(arbitrary_interval(), 0..200),
        queries in prop::collection::vec(arbitrary_interval(), 1..50),
    ) {
        let mut linked = LinkedTree::new();
        let mut arena = ArenaTree::with_capacity(0);
        linked.insert_all(&intervals).unwrap();
        arena.insert_all(&intervals).unwrap();

        for query in &queries {
            let expect = sorted(oracle(&intervals, query));
            prop_assert_eq!(sorted(linked.search(query).unwrap()), expect.clone());
            prop_assert_eq!(sorted(arena.search(query).unwrap()), expect);
        }
    }

    #[test]
    fn prop_representations_agree(
        intervals in prop::collection::vec(arbitrary_interval(), 0..200),
        queries in prop::collection::vec(arbitrary_interval(), 1..50),
    ) {
        let mut linked = LinkedTree::new();
        let mut arena = ArenaTree::with_capacity(3);
        linked.insert_all(&intervals).unwrap();
        arena.insert_all(&intervals).unwrap();

        prop_assert_eq!(linked.len(), arena.len());
        prop_assert_eq!(linked.height(), arena.height());
        prop_assert_eq!(
            run_queries(&queries, &linked).unwrap(),
            run_queries(&queries, &arena).unwrap()
        );
    }

    #[test]
    fn prop_invariants_hold(
        intervals in prop::collection::vec(arbitrary_interval(), 0..100),
    ) {
        let mut linked = LinkedTree::new();
        let mut arena = ArenaTree::with_capacity(1);
        for interval in &intervals {
            linked.insert(interval).unwrap();
            arena.insert(interval).unwrap();
            linked.check_invariants();
            arena.check_invariants();
        }
    }

    #[test]
    fn prop_invalid_bounds_rejected(start in any::<i32>(), back in 0..1000i32) {
        let end = start.saturating_sub(back);
        let mut linked = LinkedTree::new();
        let mut arena = ArenaTree::new();
        prop_assert!(linked.insert((start, end)).is_err());
        prop_assert!(arena.insert((start, end)).is_err());
        prop_assert!(linked.search((start, end)).is_err());
        prop_assert!(arena.search((start, end)).is_err());
        prop_assert!(linked.is_empty() && arena.is_empty());
    }
}
