//! Cost-ordered frontier shared by uniform-cost search and A*.
//!
//! Both strategies keep a table of the best known accumulated cost `g` per
//! discovered state and a min-heap keyed on `g + h`. Improvements push a fresh
//! heap entry instead of rewriting the old one; superseded entries are
//! recognised and dropped when they surface (lazy deletion).
//!
//! # Ordering
//!
//! Entries are extracted by:
//! 1. `priority = g + h` ascending
//! 2. `g` descending (deeper entries first among equal priority)
//! 3. insertion sequence ascending (FIFO among full ties)
//!
//! The insertion sequence is unique per entry, so the order is total and
//! extraction is deterministic for a fixed insertion sequence.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use ordered_float::OrderedFloat;

use crate::frontier::{Frontier, FrontierKind};
use crate::heuristic::{Heuristic, ZeroHeuristic};

/// Heap ordering key. Derived `Ord` compares fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PriorityKey {
    priority: OrderedFloat<f64>,
    deeper_first: Reverse<OrderedFloat<f64>>,
    seq: u64,
}

#[derive(Debug)]
struct HeapEntry<S> {
    key: Reverse<PriorityKey>,
    g: f64,
    state: S,
}

impl<S> PartialEq for HeapEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for HeapEntry<S> {}

impl<S> PartialOrd for HeapEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for HeapEntry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority frontier ordered by `g + h(state)`.
///
/// With [`ZeroHeuristic`] this is uniform-cost search; see
/// [`UniformCostFrontier`] and [`AStarFrontier`].
pub struct CostOrderedFrontier<S, H = ZeroHeuristic> {
    kind: FrontierKind,
    heuristic: H,
    heap: BinaryHeap<HeapEntry<S>>,
    best: HashMap<S, f64>,
    next_seq: u64,
    high_water: usize,
    stale_skipped: u64,
}

/// Dijkstra / uniform-cost frontier.
pub type UniformCostFrontier<S> = CostOrderedFrontier<S, ZeroHeuristic>;

/// A* frontier with heuristic `H`.
pub type AStarFrontier<S, H> = CostOrderedFrontier<S, H>;

impl<S: Clone + Eq + Hash> CostOrderedFrontier<S, ZeroHeuristic> {
    /// Uniform-cost search: priority is the accumulated cost alone.
    #[must_use]
    pub fn uniform_cost() -> Self {
        Self::with_kind(FrontierKind::UniformCost, ZeroHeuristic)
    }
}

impl<S: Clone + Eq + Hash, H: Heuristic<S>> CostOrderedFrontier<S, H> {
    /// A* search guided by `heuristic`.
    ///
    /// Optimality of the returned path requires the heuristic to be
    /// admissible; that is not checked.
    #[must_use]
    pub fn astar(heuristic: H) -> Self {
        Self::with_kind(FrontierKind::AStar, heuristic)
    }

    fn with_kind(kind: FrontierKind, heuristic: H) -> Self {
        Self {
            kind,
            heuristic,
            heap: BinaryHeap::new(),
            best: HashMap::new(),
            next_seq: 0,
            high_water: 0,
            stale_skipped: 0,
        }
    }

    /// The heuristic in use.
    #[must_use]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    fn estimate(&self, state: &S) -> f64 {
        let h = self.heuristic.estimate(state);
        if h.is_finite() && h >= 0.0 {
            h
        } else {
            tracing::warn!(estimate = h, "heuristic returned a non-finite or negative estimate; using 0");
            0.0
        }
    }

    fn push(&mut self, state: S, g: f64) {
        let h = self.estimate(&state);
        let key = PriorityKey {
            priority: OrderedFloat(g + h),
            deeper_first: Reverse(OrderedFloat(g)),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            key: Reverse(key),
            g,
            state,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }
}

impl<S: Clone + Eq + Hash, H: Heuristic<S>> Frontier<S> for CostOrderedFrontier<S, H> {
    fn kind(&self) -> FrontierKind {
        self.kind
    }

    fn insert(&mut self, state: S, cost: f64) {
        self.best.insert(state.clone(), cost);
        self.push(state, cost);
    }

    fn extract(&mut self) -> Option<S> {
        while let Some(entry) = self.heap.pop() {
            let current = self.best.get(&entry.state).copied();
            if current.is_some_and(|best| entry.g > best) {
                self.stale_skipped += 1;
                continue;
            }
            return Some(entry.state);
        }
        None
    }

    fn resolve_duplicate(&mut self, state: &S, cost: f64) -> bool {
        match self.best.get(state) {
            Some(&best) if cost < best => {
                self.best.insert(state.clone(), cost);
                self.push(state.clone(), cost);
                true
            }
            Some(_) => false,
            None => {
                // Not discovered through this frontier; treat as a fresh insert.
                self.insert(state.clone(), cost);
                true
            }
        }
    }

    fn best_cost(&self, state: &S) -> Option<f64> {
        self.best.get(state).copied()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.best.clear();
        self.next_seq = 0;
        self.high_water = 0;
        self.stale_skipped = 0;
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn stale_skipped(&self) -> u64 {
        self.stale_skipped
    }
}

impl<S, H> std::fmt::Debug for CostOrderedFrontier<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostOrderedFrontier")
            .field("kind", &self.kind)
            .field("entries", &self.heap.len())
            .field("tracked", &self.best.len())
            .field("high_water", &self.high_water)
            .field("stale_skipped", &self.stale_skipped)
            .finish_non_exhaustive()
    }
}
