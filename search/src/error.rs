//! Typed search errors.
//!
//! Configuration errors (`MissingCostFunction`, `UnknownFrontier`) fail before
//! any exploration. Problem query errors propagate unmodified through
//! `Problem`. Frontier exhaustion is NOT an error: it is
//! [`crate::search::SearchOutcome::Exhausted`].

use wayfinder_kernel::problem::ProblemError;

use crate::frontier::FrontierKind;

/// Failure of search construction, execution, or solution handling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A query against the planning problem failed.
    #[error(transparent)]
    Problem(#[from] ProblemError),

    /// A cost-ordered frontier was paired with a problem that has no cost function.
    #[error("{frontier} search requires a cost function on the problem")]
    MissingCostFunction { frontier: FrontierKind },

    /// An empty path was handed to validation or formatting.
    #[error("solution path is empty")]
    EmptySolution,

    /// Two consecutive path states are not connected by a single transition.
    #[error("no transition from {from} to {to}")]
    BrokenPath { from: String, to: String },

    /// A frontier selection string did not name a known strategy.
    #[error("unknown frontier type: {name:?}")]
    UnknownFrontier { name: String },
}
