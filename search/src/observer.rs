//! Side-channel reporting from the search loop.
//!
//! Observers see every step of a search but cannot influence it: `report`
//! returns nothing, so sink failures stay inside the observer.

use crate::frontier::FrontierKind;
use crate::solution::SolutionPath;

/// What happened to a successor when the engine considered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessorOutcome {
    /// First time this state was reached; it was inserted into the frontier.
    Discovered,
    /// Already discovered; a strictly cheaper path replaced the old one.
    Relaxed,
    /// Already discovered; nothing changed.
    Ignored,
}

impl SuccessorOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Relaxed => "relaxed",
            Self::Ignored => "ignored",
        }
    }
}

/// One observable step of a search.
///
/// Cadence: one `Initialize` before the first frontier insertion, one
/// `Extract` per state taken from the frontier, one `Successor` per successor
/// considered, and exactly one terminal `Solved` or `Exhausted`.
#[derive(Debug)]
pub enum SearchEvent<'a, S> {
    Initialize {
        initial: &'a S,
        frontier: FrontierKind,
    },
    Extract {
        state: &'a S,
        /// Frontier entries remaining after the extraction.
        frontier_len: usize,
        /// 1-based count of extractions in this search.
        iteration: u64,
    },
    Successor {
        parent: &'a S,
        successor: &'a S,
        /// Accumulated cost through `parent`; `None` for strategies that do
        /// not track costs.
        cost: Option<f64>,
        outcome: SuccessorOutcome,
    },
    Solved {
        path: &'a SolutionPath<S>,
        expansions: u64,
    },
    Exhausted {
        expansions: u64,
        discovered: usize,
    },
}

impl<S> SearchEvent<'_, S> {
    /// Stable event label used by log sinks.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "Initialize",
            Self::Extract { .. } => "Extract",
            Self::Successor { .. } => "Successor",
            Self::Solved { .. } => "Solved",
            Self::Exhausted { .. } => "Exhausted",
        }
    }

    /// Whether this event ends the search.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Solved { .. } | Self::Exhausted { .. })
    }
}

/// Receiver of [`SearchEvent`]s.
pub trait SearchObserver<S> {
    fn report(&mut self, event: &SearchEvent<'_, S>);
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl<S> SearchObserver<S> for NullObserver {
    fn report(&mut self, _event: &SearchEvent<'_, S>) {}
}

/// In-memory observer recording labels and extraction order.
#[derive(Debug, Clone)]
pub struct RecordingObserver<S> {
    labels: Vec<&'static str>,
    extracted: Vec<S>,
    outcomes: Vec<SuccessorOutcome>,
}

impl<S> RecordingObserver<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            extracted: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Labels of every event, in report order.
    #[must_use]
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// States in the order they were extracted.
    #[must_use]
    pub fn extracted(&self) -> &[S] {
        &self.extracted
    }

    /// Outcome of every `Successor` event.
    #[must_use]
    pub fn outcomes(&self) -> &[SuccessorOutcome] {
        &self.outcomes
    }

    /// Number of events carrying `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }
}

impl<S> Default for RecordingObserver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> SearchObserver<S> for RecordingObserver<S> {
    fn report(&mut self, event: &SearchEvent<'_, S>) {
        self.labels.push(event.label());
        match event {
            SearchEvent::Extract { state, .. } => self.extracted.push((*state).clone()),
            SearchEvent::Successor { outcome, .. } => self.outcomes.push(*outcome),
            _ => {}
        }
    }
}

impl<S, O: SearchObserver<S> + ?Sized> SearchObserver<S> for &mut O {
    fn report(&mut self, event: &SearchEvent<'_, S>) {
        (**self).report(event);
    }
}
