//! Remaining-cost estimates for A*.
//!
//! No admissibility check is performed. An inadmissible heuristic silently
//! forfeits optimality.

/// Estimate of the remaining cost from a state to the nearest goal.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> f64;
}

/// The zero heuristic. A* with this estimate orders exactly like uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> f64 {
        0.0
    }
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> f64,
{
    fn estimate(&self, state: &S) -> f64 {
        self(state)
    }
}
