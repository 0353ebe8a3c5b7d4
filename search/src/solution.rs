//! Solution paths: reconstruction from a visitation map, validation against a
//! problem, cost totals, and formatting.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use wayfinder_kernel::problem::{PlanningProblem, StateSpace};

use crate::error::SearchError;

/// Options for [`SolutionPath::format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub separator: String,
    /// Prefix each state with its 1-based position (`"1. A"`).
    pub include_indices: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: " -> ".to_string(),
            include_indices: false,
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_indices(mut self) -> Self {
        self.include_indices = true;
        self
    }
}

/// An ordered state sequence from the initial state to a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath<S> {
    states: Vec<S>,
}

impl<S> SolutionPath<S> {
    /// Wrap an explicit state sequence. No validation is performed.
    #[must_use]
    pub fn from_states(states: Vec<S>) -> Self {
        Self { states }
    }

    /// Number of states (edge count + 1 for a non-empty path).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of transitions along the path.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[must_use]
    pub fn states(&self) -> &[S] {
        &self.states
    }

    #[must_use]
    pub fn initial(&self) -> Option<&S> {
        self.states.first()
    }

    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }

    #[must_use]
    pub fn into_states(self) -> Vec<S> {
        self.states
    }

    /// Render the path with a caller-supplied state formatter.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptySolution`] if the path is empty.
    pub fn format_with<F>(&self, options: &FormatOptions, formatter: F) -> Result<String, SearchError>
    where
        F: Fn(&S) -> String,
    {
        if self.states.is_empty() {
            return Err(SearchError::EmptySolution);
        }
        let parts: Vec<String> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, state)| {
                if options.include_indices {
                    format!("{}. {}", i + 1, formatter(state))
                } else {
                    formatter(state)
                }
            })
            .collect();
        Ok(parts.join(&options.separator))
    }
}

impl<S: Display> SolutionPath<S> {
    /// Render the path using each state's `Display`.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptySolution`] if the path is empty.
    pub fn format(&self, options: &FormatOptions) -> Result<String, SearchError> {
        self.format_with(options, ToString::to_string)
    }
}

impl<S: Clone + Eq + Hash + Debug> SolutionPath<S> {
    /// Walk predecessor pointers from `goal` back to the entry whose
    /// predecessor is `None`, then reverse.
    ///
    /// The walk is bounded by the map size, so a malformed map with a
    /// predecessor cycle yields a truncated path instead of looping.
    #[must_use]
    pub fn reconstruct(goal: &S, visited: &HashMap<S, Option<S>>) -> Self {
        let mut states = vec![goal.clone()];
        let mut current = goal;
        for _ in 0..visited.len() {
            match visited.get(current) {
                Some(Some(pred)) => {
                    states.push(pred.clone());
                    current = pred;
                }
                _ => break,
            }
        }
        states.reverse();
        Self { states }
    }

    /// Check the path against `problem`.
    ///
    /// Returns `Ok(false)` if the first state is not the initial state, the
    /// last is not a goal, any state fails membership, or any consecutive pair
    /// is not a one-step successor.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptySolution`] if the path is empty.
    pub fn validate<P>(&self, problem: &PlanningProblem<P>) -> Result<bool, SearchError>
    where
        P: StateSpace<State = S>,
    {
        let (Some(first), Some(last)) = (self.states.first(), self.states.last()) else {
            return Err(SearchError::EmptySolution);
        };
        if first != problem.initial_state() || !problem.is_goal(last) {
            return Ok(false);
        }
        if !self.states.iter().all(|s| problem.space().contains(s)) {
            return Ok(false);
        }
        for pair in self.states.windows(2) {
            if !problem.successors(&pair[0])?.contains(&pair[1]) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Sum of the cheapest one-step cost between each consecutive pair.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Problem`] for membership or cost-function failures.
    /// - [`SearchError::BrokenPath`] if a consecutive pair is not a transition.
    pub fn total_cost<P>(&self, problem: &PlanningProblem<P>) -> Result<f64, SearchError>
    where
        P: StateSpace<State = S>,
    {
        let mut total = 0.0;
        for pair in self.states.windows(2) {
            let step = problem
                .transition_cost(&pair[0], &pair[1])?
                .ok_or_else(|| SearchError::BrokenPath {
                    from: format!("{:?}", pair[0]),
                    to: format!("{:?}", pair[1]),
                })?;
            total += step;
        }
        Ok(total)
    }
}
