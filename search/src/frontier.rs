//! Frontier strategies: the pluggable half of the search loop.
//!
//! The engine owns the visitation map and the loop; a [`Frontier`] owns the
//! container of discovered-but-unexpanded states and decides insertion order,
//! extraction order, and what happens when a discovered state is reached again.

use std::collections::VecDeque;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::priority::CostOrderedFrontier;

/// The four frontier strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum FrontierKind {
    /// FIFO queue: breadth-first search.
    BreadthFirst,
    /// LIFO stack: depth-first search.
    DepthFirst,
    /// Priority by accumulated cost: uniform-cost search (Dijkstra).
    UniformCost,
    /// Priority by accumulated cost plus heuristic: A*.
    AStar,
}

impl FrontierKind {
    /// All kinds in declaration order.
    pub const ALL: [FrontierKind; 4] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::UniformCost,
        Self::AStar,
    ];

    /// Whether this strategy orders by cost and so needs a cost function.
    #[must_use]
    pub const fn requires_cost(self) -> bool {
        matches!(self, Self::UniformCost | Self::AStar)
    }

    /// Stable lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
            Self::UniformCost => "uniform_cost",
            Self::AStar => "astar",
        }
    }

    /// Build a boxed frontier of this kind.
    ///
    /// `heuristic` is used only by [`FrontierKind::AStar`]; the other kinds
    /// drop it.
    #[must_use]
    pub fn build<S, H>(self, heuristic: H) -> Box<dyn Frontier<S>>
    where
        S: Clone + Eq + Hash + 'static,
        H: Heuristic<S> + 'static,
    {
        match self {
            Self::BreadthFirst => Box::new(FifoFrontier::new()),
            Self::DepthFirst => Box::new(LifoFrontier::new()),
            Self::UniformCost => Box::new(CostOrderedFrontier::uniform_cost()),
            Self::AStar => Box::new(CostOrderedFrontier::astar(heuristic)),
        }
    }
}

impl std::fmt::Display for FrontierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontierKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth_first" | "depth-first" => Ok(Self::DepthFirst),
            "ucs" | "dijkstra" | "uniform_cost" | "uniform-cost" => Ok(Self::UniformCost),
            "astar" | "a*" | "a_star" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownFrontier { name: s.to_string() }),
        }
    }
}

impl TryFrom<String> for FrontierKind {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrontierKind> for String {
    fn from(kind: FrontierKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Insertion, extraction, and duplicate-resolution policy for one search.
///
/// # Contract
///
/// - `insert` is called exactly once per newly discovered state, with its
///   accumulated cost from the initial state (`0.0` for the initial state).
///   Strategies that do not order by cost ignore it.
/// - `extract` returns the next state to expand, or `None` when nothing
///   current remains. It must be deterministic for the same insertion sequence.
/// - `resolve_duplicate` is called when an already-discovered state is reached
///   again with accumulated cost `cost`. Returning `true` means the new path is
///   strictly better and the engine must repoint the state's predecessor.
pub trait Frontier<S> {
    /// Which strategy this is.
    fn kind(&self) -> FrontierKind;

    /// Add a newly discovered state.
    fn insert(&mut self, state: S, cost: f64);

    /// Remove and return the next state to expand.
    fn extract(&mut self) -> Option<S>;

    /// Handle a rediscovered state. See the trait contract.
    fn resolve_duplicate(&mut self, state: &S, cost: f64) -> bool;

    /// Best known accumulated cost for `state`, if this strategy tracks costs.
    fn best_cost(&self, _state: &S) -> Option<f64> {
        None
    }

    /// Number of entries currently held (stale entries included).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and per-search bookkeeping.
    fn clear(&mut self);

    /// Largest `len()` observed since the last `clear`.
    fn high_water(&self) -> usize;

    /// Superseded entries discarded at extraction since the last `clear`.
    fn stale_skipped(&self) -> u64 {
        0
    }
}

/// First-in first-out frontier: breadth-first search.
///
/// States are discovered in non-decreasing depth order, so the first goal
/// extracted lies on a path with the fewest edges.
#[derive(Debug, Clone)]
pub struct FifoFrontier<S> {
    queue: VecDeque<S>,
    high_water: usize,
}

impl<S> FifoFrontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            high_water: 0,
        }
    }
}

impl<S> Default for FifoFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for FifoFrontier<S> {
    fn kind(&self) -> FrontierKind {
        FrontierKind::BreadthFirst
    }

    fn insert(&mut self, state: S, _cost: f64) {
        self.queue.push_back(state);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn extract(&mut self) -> Option<S> {
        self.queue.pop_front()
    }

    fn resolve_duplicate(&mut self, _state: &S, _cost: f64) -> bool {
        false
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.high_water = 0;
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Last-in first-out frontier: depth-first search. No optimality guarantee.
#[derive(Debug, Clone)]
pub struct LifoFrontier<S> {
    stack: Vec<S>,
    high_water: usize,
}

impl<S> LifoFrontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            high_water: 0,
        }
    }
}

impl<S> Default for LifoFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for LifoFrontier<S> {
    fn kind(&self) -> FrontierKind {
        FrontierKind::DepthFirst
    }

    fn insert(&mut self, state: S, _cost: f64) {
        self.stack.push(state);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn extract(&mut self) -> Option<S> {
        self.stack.pop()
    }

    fn resolve_duplicate(&mut self, _state: &S, _cost: f64) -> bool {
        false
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self) {
        self.stack.clear();
        self.high_water = 0;
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S, F: Frontier<S> + ?Sized> Frontier<S> for Box<F> {
    fn kind(&self) -> FrontierKind {
        (**self).kind()
    }

    fn insert(&mut self, state: S, cost: f64) {
        (**self).insert(state, cost);
    }

    fn extract(&mut self) -> Option<S> {
        (**self).extract()
    }

    fn resolve_duplicate(&mut self, state: &S, cost: f64) -> bool {
        (**self).resolve_duplicate(state, cost)
    }

    fn best_cost(&self, state: &S) -> Option<f64> {
        (**self).best_cost(state)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn high_water(&self) -> usize {
        (**self).high_water()
    }

    fn stale_skipped(&self) -> u64 {
        (**self).stale_skipped()
    }
}
