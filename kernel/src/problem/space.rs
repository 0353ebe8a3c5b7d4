//! The `StateSpace` capability trait.

use std::fmt::Debug;
use std::hash::Hash;

/// The predicate set that defines a discrete planning problem.
///
/// A concrete world (grid, graph, height field) implements this once; the
/// search layer only ever talks to it through [`crate::problem::PlanningProblem`].
///
/// # Contract
///
/// - All methods must be pure: same input, same output, for the lifetime of
///   any search that uses the space.
/// - `actions` must be deterministic in order. Search tie-breaking follows
///   this order, so two runs over the same space only agree if it is stable.
/// - `transition` is only called with an action returned by `actions` for the
///   same state.
/// - `predecessors`, when provided, must return pairs `(p, a)` such that
///   `transition(p, a)` yields the queried state. This is not verified.
pub trait StateSpace {
    /// A state. Used as a map key by the engine and never interpreted.
    type State: Clone + Eq + Hash + Debug;
    /// An action available from some state.
    type Action: Clone + PartialEq + Debug;

    /// Membership test: does `state` belong to the state space?
    fn contains(&self, state: &Self::State) -> bool;

    /// The actions available from `state`, in a deterministic order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` in `state`.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether [`StateSpace::step_cost`] is implemented.
    ///
    /// Cost-ordered strategies refuse to run against a space returning `false`.
    fn has_cost_function(&self) -> bool {
        false
    }

    /// Cost of applying `action` in `state`. `None` means no cost function.
    ///
    /// Implementations return the raw value; validation (finite,
    /// non-negative) happens in [`crate::problem::PlanningProblem::cost`].
    fn step_cost(&self, _state: &Self::State, _action: &Self::Action) -> Option<f64> {
        None
    }

    /// Predecessor pairs `(predecessor, action)` of `state`.
    /// `None` means the space has no predecessor function.
    fn predecessors(&self, _state: &Self::State) -> Option<Vec<(Self::State, Self::Action)>> {
        None
    }

    /// The union of all action sets, if the space can enumerate it.
    fn action_space(&self) -> Option<Vec<Self::Action>> {
        None
    }
}
