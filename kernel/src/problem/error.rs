//! Typed problem errors.
//!
//! Construction errors (`InvalidInitialState`, `InvalidGoalState`) fail before
//! any search begins. The rest are query errors raised at the call site and
//! propagated unmodified through the search engine.

/// Failure of a [`crate::problem::PlanningProblem`] construction or query.
///
/// States and actions are generic, so offending values are carried as their
/// `Debug` rendering in `detail`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    /// The initial state fails the membership predicate.
    #[error("initial state is not in the state space: {detail}")]
    InvalidInitialState { detail: String },

    /// A goal state fails the membership predicate.
    #[error("goal state is not in the state space: {detail}")]
    InvalidGoalState { detail: String },

    /// A queried state fails the membership predicate.
    #[error("state is not in the state space: {detail}")]
    StateNotInSpace { detail: String },

    /// The action is not in the queried state's action set.
    #[error("action {action} is not available in state {state}")]
    ActionNotAvailable { state: String, action: String },

    /// `predecessors` was queried on a space without a predecessor function.
    #[error("no predecessor function is defined for this problem")]
    PredecessorUndefined,

    /// `cost` was queried on a space without a cost function.
    #[error("no cost function is defined for this problem")]
    CostUndefined,

    /// The cost function returned a negative or non-finite value.
    #[error("cost function returned {value} for state {state}, action {action}")]
    InvalidCostValue {
        state: String,
        action: String,
        value: f64,
    },
}

pub(crate) fn detail<T: std::fmt::Debug>(value: &T) -> String {
    format!("{value:?}")
}
