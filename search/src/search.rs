//! The search engine: one fixed exploration loop over a pluggable frontier.
//!
//! ```text
//! Idle --begin--> Running --step*--> Finished(Solved | Exhausted)
//! ```
//!
//! Per iteration:
//! 1. Extract one state via the frontier's extraction rule.
//! 2. If it is a goal, reconstruct the path and stop.
//! 3. Otherwise, for every `(action, successor)` of the state: an undiscovered
//!    successor is recorded with its predecessor and inserted; an already
//!    discovered one goes to the frontier's duplicate rule, and a `true`
//!    answer repoints its predecessor.
//! 4. Repeat until the frontier is empty or a goal is found.
//!
//! Every search starts from a clean slate: [`SearchEngine::begin`] (and so
//! [`SearchEngine::generate_solution`]) resets the frontier, the visitation
//! map and the statistics before seeding the initial state.

use std::collections::HashMap;

use wayfinder_kernel::problem::{PlanningProblem, StateSpace};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::observer::{NullObserver, SearchEvent, SearchObserver, SuccessorOutcome};
use crate::solution::SolutionPath;

/// Terminal result of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<S> {
    /// A goal was extracted; the path runs from the initial state to it.
    Solved(SolutionPath<S>),
    /// The frontier ran dry before any goal was extracted.
    Exhausted,
}

impl<S> SearchOutcome<S> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    #[must_use]
    pub fn path(&self) -> Option<&SolutionPath<S>> {
        match self {
            Self::Solved(path) => Some(path),
            Self::Exhausted => None,
        }
    }

    #[must_use]
    pub fn into_path(self) -> Option<SolutionPath<S>> {
        match self {
            Self::Solved(path) => Some(path),
            Self::Exhausted => None,
        }
    }
}

/// Result of a single [`SearchEngine::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<S> {
    /// More work remains.
    Continue,
    /// The search has terminated.
    Finished(SearchOutcome<S>),
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States extracted and expanded (goal extractions are not expansions).
    pub expansions: u64,
    /// `(action, successor)` pairs considered.
    pub successors_considered: u64,
    /// Distinct states discovered, the initial state included.
    pub discovered: u64,
    /// Successors that had already been discovered.
    pub duplicates: u64,
    /// Duplicates that improved the best known cost.
    pub relaxations: u64,
    /// Superseded frontier entries dropped at extraction.
    pub stale_skipped: u64,
    /// Peak frontier size.
    pub frontier_high_water: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase<S> {
    Idle,
    Running,
    Finished(SearchOutcome<S>),
}

/// Forward search over a [`PlanningProblem`] driven by frontier `F`.
///
/// Single-threaded and non-reentrant: one search owns the frontier and the
/// visitation map from `begin` until it finishes.
pub struct SearchEngine<'p, P: StateSpace, F> {
    problem: &'p PlanningProblem<P>,
    frontier: F,
    visited: HashMap<P::State, Option<P::State>>,
    stats: SearchStats,
    phase: Phase<P::State>,
}

impl<P: StateSpace, F: std::fmt::Debug> std::fmt::Debug for SearchEngine<'_, P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("frontier", &self.frontier)
            .field("visited", &self.visited.len())
            .field("stats", &self.stats)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<'p, P, F> SearchEngine<'p, P, F>
where
    P: StateSpace,
    F: Frontier<P::State>,
{
    /// Pair `problem` with `frontier`.
    ///
    /// # Errors
    ///
    /// [`SearchError::MissingCostFunction`] if the frontier orders by cost and
    /// the problem has no cost function.
    pub fn new(problem: &'p PlanningProblem<P>, frontier: F) -> Result<Self, SearchError> {
        let kind = frontier.kind();
        if kind.requires_cost() && !problem.has_cost_function() {
            return Err(SearchError::MissingCostFunction { frontier: kind });
        }
        Ok(Self {
            problem,
            frontier,
            visited: HashMap::new(),
            stats: SearchStats::default(),
            phase: Phase::Idle,
        })
    }

    #[must_use]
    pub fn problem(&self) -> &'p PlanningProblem<P> {
        self.problem
    }

    #[must_use]
    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    /// Visitation map of the current or most recent search:
    /// `state -> predecessor`, `None` only for the initial state.
    #[must_use]
    pub fn visited(&self) -> &HashMap<P::State, Option<P::State>> {
        &self.visited
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Whether the current search has reached a terminal outcome.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Drop all per-search state.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.stats = SearchStats::default();
        self.phase = Phase::Idle;
    }

    /// Run a search to completion without observation.
    ///
    /// # Errors
    ///
    /// Problem query failures ([`SearchError::Problem`]) propagate unmodified.
    pub fn generate_solution(&mut self) -> Result<SearchOutcome<P::State>, SearchError> {
        self.generate_solution_observed(&mut NullObserver)
    }

    /// Run a search to completion, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// Problem query failures ([`SearchError::Problem`]) propagate unmodified.
    pub fn generate_solution_observed<O>(
        &mut self,
        observer: &mut O,
    ) -> Result<SearchOutcome<P::State>, SearchError>
    where
        O: SearchObserver<P::State> + ?Sized,
    {
        self.begin(observer);
        loop {
            if let StepOutcome::Finished(outcome) = self.step(observer)? {
                return Ok(outcome);
            }
        }
    }

    /// Reset and seed the frontier with the initial state at zero cost.
    pub fn begin<O>(&mut self, observer: &mut O)
    where
        O: SearchObserver<P::State> + ?Sized,
    {
        self.reset();
        let initial = self.problem.initial_state().clone();
        tracing::debug!(frontier = %self.frontier.kind(), initial = ?initial, "search started");
        observer.report(&SearchEvent::Initialize {
            initial: &initial,
            frontier: self.frontier.kind(),
        });
        self.visited.insert(initial.clone(), None);
        self.stats.discovered = 1;
        self.frontier.insert(initial, 0.0);
        self.sync_frontier_stats();
        self.phase = Phase::Running;
    }

    /// Perform exactly one iteration of the loop.
    ///
    /// Calling `step` before `begin` begins a fresh search first. Calling it
    /// after the search finished returns the same terminal outcome again.
    ///
    /// # Errors
    ///
    /// Problem query failures ([`SearchError::Problem`]) propagate unmodified;
    /// the search is left mid-iteration and should be reset.
    pub fn step<O>(&mut self, observer: &mut O) -> Result<StepOutcome<P::State>, SearchError>
    where
        O: SearchObserver<P::State> + ?Sized,
    {
        if let Phase::Finished(outcome) = &self.phase {
            return Ok(StepOutcome::Finished(outcome.clone()));
        }
        if self.phase == Phase::Idle {
            self.begin(observer);
        }

        let Some(state) = self.frontier.extract() else {
            self.sync_frontier_stats();
            observer.report(&SearchEvent::Exhausted {
                expansions: self.stats.expansions,
                discovered: self.visited.len(),
            });
            return Ok(self.finish(SearchOutcome::Exhausted));
        };
        self.sync_frontier_stats();

        observer.report(&SearchEvent::Extract {
            state: &state,
            frontier_len: self.frontier.len(),
            iteration: self.stats.expansions + 1,
        });

        if self.problem.is_goal(&state) {
            let path = SolutionPath::reconstruct(&state, &self.visited);
            observer.report(&SearchEvent::Solved {
                path: &path,
                expansions: self.stats.expansions,
            });
            return Ok(self.finish(SearchOutcome::Solved(path)));
        }

        self.expand(&state, observer)?;
        Ok(StepOutcome::Continue)
    }

    fn expand<O>(&mut self, state: &P::State, observer: &mut O) -> Result<(), SearchError>
    where
        O: SearchObserver<P::State> + ?Sized,
    {
        self.stats.expansions += 1;
        tracing::trace!(state = ?state, expansion = self.stats.expansions, "expand");

        let tracks_cost = self.frontier.kind().requires_cost();
        let parent_cost = self.frontier.best_cost(state).unwrap_or(0.0);

        for (action, successor) in self.problem.transitions(state)? {
            self.stats.successors_considered += 1;
            let cost = if tracks_cost {
                Some(parent_cost + self.problem.checked_step_cost(state, &action)?)
            } else {
                None
            };
            let accumulated = cost.unwrap_or(0.0);

            let outcome = if self.visited.contains_key(&successor) {
                self.stats.duplicates += 1;
                if self.frontier.resolve_duplicate(&successor, accumulated) {
                    self.stats.relaxations += 1;
                    self.visited.insert(successor.clone(), Some(state.clone()));
                    SuccessorOutcome::Relaxed
                } else {
                    SuccessorOutcome::Ignored
                }
            } else {
                self.stats.discovered += 1;
                self.visited.insert(successor.clone(), Some(state.clone()));
                self.frontier.insert(successor.clone(), accumulated);
                SuccessorOutcome::Discovered
            };

            observer.report(&SearchEvent::Successor {
                parent: state,
                successor: &successor,
                cost,
                outcome,
            });
        }
        self.sync_frontier_stats();
        Ok(())
    }

    fn sync_frontier_stats(&mut self) {
        self.stats.frontier_high_water = self.frontier.high_water();
        self.stats.stale_skipped = self.frontier.stale_skipped();
    }

    fn finish(&mut self, outcome: SearchOutcome<P::State>) -> StepOutcome<P::State> {
        tracing::debug!(
            solved = outcome.is_solved(),
            expansions = self.stats.expansions,
            discovered = self.stats.discovered,
            relaxations = self.stats.relaxations,
            "search finished"
        );
        self.phase = Phase::Finished(outcome.clone());
        StepOutcome::Finished(outcome)
    }
}
