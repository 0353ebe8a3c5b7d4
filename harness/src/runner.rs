//! Harness runner: drive one search under a [`RunPolicy`] and report on it.
//!
//! # Pipeline
//!
//! ```text
//! validate policy → build frontier → SearchEngine::new
//!   → begin → [step × N, budget checked between steps]
//!   → validate path → total cost → transcript digest → close log
//! ```
//!
//! Every event the engine reports lands in an in-memory transcript (and the
//! event log when the policy names one). The transcript's canonical JSON is
//! hashed into `transcript_digest`, which is identical for identical runs in
//! any process.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;

use wayfinder_kernel::problem::{PlanningProblem, StateSpace};
use wayfinder_kernel::proof::canon::canonical_json_bytes;
use wayfinder_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use wayfinder_search::error::SearchError;
use wayfinder_search::frontier::{Frontier, FrontierKind};
use wayfinder_search::heuristic::Heuristic;
use wayfinder_search::search::{SearchEngine, SearchOutcome, SearchStats, StepOutcome};
use wayfinder_search::solution::SolutionPath;

use crate::event_log::{EventLogWriter, LogWriteError};
use crate::observer::{state_value, JsonLogObserver, TeeSink, Transcript};
use crate::policy::{PolicyError, RunPolicy};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RunStatus {
    Solved,
    Exhausted,
    /// The expansion budget ran out first. Not an error.
    BudgetExhausted,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport<S> {
    pub status: RunStatus,
    pub frontier: FrontierKind,
    pub path: Option<SolutionPath<S>>,
    /// Path cost, when solved on a problem with a cost function.
    pub total_cost: Option<f64>,
    pub stats: SearchStats,
    pub policy_digest: ContentHash,
    pub transcript_digest: ContentHash,
    pub path_digest: Option<ContentHash>,
    /// Number of transcript entries.
    pub events: usize,
    pub log_files: Vec<PathBuf>,
    /// First event-log write failure, if any. The run itself still completed.
    pub log_error: Option<String>,
}

impl<S> RunReport<S> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == RunStatus::Solved
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Log(#[from] LogWriteError),

    #[error("search returned a path that does not validate: {path}")]
    InvalidSolution { path: String },
}

/// Run `problem` under `policy`.
///
/// `heuristic` is consulted only when the policy selects A*.
///
/// The budget caps expansions: once `expansion_budget` states have been
/// expanded the run stops with [`RunStatus::BudgetExhausted`], even if the
/// next extraction would have been a goal.
///
/// # Errors
///
/// - [`RunError::Policy`] for an invalid policy.
/// - [`RunError::Search`] for configuration or problem query failures.
/// - [`RunError::Log`] if the event log cannot be opened or closed.
/// - [`RunError::InvalidSolution`] if the returned path fails validation.
pub fn run_search<P, H>(
    problem: &PlanningProblem<P>,
    policy: &RunPolicy,
    heuristic: H,
) -> Result<RunReport<P::State>, RunError>
where
    P: StateSpace,
    P::State: Serialize + 'static,
    H: Heuristic<P::State> + 'static,
{
    policy.validate()?;
    let policy_digest = policy.digest()?;

    let frontier: Box<dyn Frontier<P::State>> = policy.frontier.build(heuristic);
    let mut engine = SearchEngine::new(problem, frontier)?;
    let log = match &policy.log {
        Some(target) => Some(EventLogWriter::open(&target.path, target.config.clone())?),
        None => None,
    };
    let mut observer = JsonLogObserver::new(TeeSink {
        transcript: Transcript::new(),
        log,
    });

    engine.begin(&mut observer);
    let outcome = loop {
        if policy
            .expansion_budget
            .is_some_and(|budget| engine.stats().expansions >= budget)
        {
            break None;
        }
        if let StepOutcome::Finished(outcome) = engine.step(&mut observer)? {
            break Some(outcome);
        }
    };
    let stats = engine.stats();

    let (status, path) = match outcome {
        Some(SearchOutcome::Solved(path)) => (RunStatus::Solved, Some(path)),
        Some(SearchOutcome::Exhausted) => (RunStatus::Exhausted, None),
        None => {
            observer.record_extra(
                "BudgetExhausted",
                json!({
                    "expansions": stats.expansions,
                    "budget": policy.expansion_budget,
                }),
            );
            (RunStatus::BudgetExhausted, None)
        }
    };

    let (total_cost, path_digest) = match &path {
        Some(p) => {
            if !p.validate(problem)? {
                return Err(RunError::InvalidSolution {
                    path: p.format_with(&Default::default(), |s| format!("{s:?}"))?,
                });
            }
            let cost = if problem.has_cost_function() {
                Some(p.total_cost(problem)?)
            } else {
                None
            };
            let states: Vec<_> = p.states().iter().map(state_value).collect();
            let digest = canonical_hash(
                HashDomain::SolutionPath,
                &canonical_json_bytes(&serde_json::Value::Array(states)),
            );
            (cost, Some(digest))
        }
        None => (None, None),
    };

    let log_error = observer.first_error().map(str::to_string);
    let sink = observer.into_sink();
    let transcript_digest = canonical_hash(
        HashDomain::SearchTranscript,
        &canonical_json_bytes(&sink.transcript.to_value()),
    );
    let events = sink.transcript.len();
    let log_files = match sink.log {
        Some(writer) => writer.finish()?,
        None => Vec::new(),
    };

    tracing::info!(
        frontier = %policy.frontier,
        status = ?status,
        expansions = stats.expansions,
        discovered = stats.discovered,
        cost = ?total_cost,
        transcript = %transcript_digest,
        "search run complete"
    );

    Ok(RunReport {
        status,
        frontier: policy.frontier,
        path,
        total_cost,
        stats,
        policy_digest,
        transcript_digest,
        path_digest,
        events,
        log_files,
        log_error,
    })
}
