//! JSON rendering of search events.
//!
//! [`event_details`] turns a [`SearchEvent`] into a label plus a JSON details
//! object. [`JsonLogObserver`] feeds those into any [`EventSink`]: the
//! chunked [`EventLogWriter`], an in-memory [`Transcript`], or both.
//!
//! Sink failures never reach the engine. The first one is kept for the caller
//! and every one is logged at `warn`.

use serde::Serialize;
use serde_json::{json, Value};

use wayfinder_search::observer::{SearchEvent, SearchObserver};

use crate::event_log::{EventLogWriter, LogWriteError, UNREPRESENTABLE_ENTRY};

/// Destination for labelled JSON event details.
pub trait EventSink {
    type Error: std::fmt::Display;

    fn record(&mut self, label: &str, details: Value) -> Result<(), Self::Error>;
}

impl EventSink for EventLogWriter {
    type Error = LogWriteError;

    fn record(&mut self, label: &str, details: Value) -> Result<(), LogWriteError> {
        self.write_event(label, details).map(|_| ())
    }
}

/// In-memory list of `{"event", "details"}` objects, used for digests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<Value>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole transcript as one JSON array.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(self.entries.clone())
    }
}

impl EventSink for Transcript {
    type Error = std::convert::Infallible;

    fn record(&mut self, label: &str, details: Value) -> Result<(), Self::Error> {
        self.entries.push(json!({ "event": label, "details": details }));
        Ok(())
    }
}

/// Sink that writes to a transcript and, when present, a log file.
#[derive(Debug, Default)]
pub struct TeeSink {
    pub transcript: Transcript,
    pub log: Option<EventLogWriter>,
}

impl EventSink for TeeSink {
    type Error = LogWriteError;

    fn record(&mut self, label: &str, details: Value) -> Result<(), LogWriteError> {
        match self.transcript.record(label, details.clone()) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        match &mut self.log {
            Some(log) => log.record(label, details),
            None => Ok(()),
        }
    }
}

/// Serialize `state`, falling back to [`UNREPRESENTABLE_ENTRY`].
pub fn state_value<S: Serialize + ?Sized>(state: &S) -> Value {
    serde_json::to_value(state).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "state is not representable as JSON");
        Value::String(UNREPRESENTABLE_ENTRY.to_string())
    })
}

/// Label and details object for one event.
pub fn event_details<S: Serialize>(event: &SearchEvent<'_, S>) -> (&'static str, Value) {
    let details = match event {
        SearchEvent::Initialize { initial, frontier } => json!({
            "initial": state_value(*initial),
            "frontier": frontier.as_str(),
        }),
        SearchEvent::Extract {
            state,
            frontier_len,
            iteration,
        } => json!({
            "state": state_value(*state),
            "frontier_size": frontier_len,
            "iteration": iteration,
        }),
        SearchEvent::Successor {
            parent,
            successor,
            cost,
            outcome,
        } => json!({
            "parent": state_value(*parent),
            "successor": state_value(*successor),
            "cost": cost,
            "outcome": outcome.as_str(),
        }),
        SearchEvent::Solved { path, expansions } => json!({
            "path": path.states().iter().map(state_value).collect::<Vec<_>>(),
            "expansions": expansions,
        }),
        SearchEvent::Exhausted {
            expansions,
            discovered,
        } => json!({
            "expansions": expansions,
            "discovered": discovered,
        }),
    };
    (event.label(), details)
}

/// [`SearchObserver`] that forwards every event to an [`EventSink`].
#[derive(Debug)]
pub struct JsonLogObserver<W> {
    sink: W,
    first_error: Option<String>,
    failures: u64,
}

impl<W: EventSink> JsonLogObserver<W> {
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            first_error: None,
            failures: 0,
        }
    }

    /// Write an event that did not come from the engine (e.g. a runner
    /// budget stop). Failures are handled like engine events.
    pub fn record_extra(&mut self, label: &str, details: Value) {
        if let Err(err) = self.sink.record(label, details) {
            self.note_failure(label, &err);
        }
    }

    /// Message of the first sink failure, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.first_error.as_deref()
    }

    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    #[must_use]
    pub fn sink(&self) -> &W {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn note_failure(&mut self, label: &str, err: &W::Error) {
        self.failures += 1;
        tracing::warn!(event = label, error = %err, "event sink write failed");
        if self.first_error.is_none() {
            self.first_error = Some(err.to_string());
        }
    }
}

impl<S: Serialize, W: EventSink> SearchObserver<S> for JsonLogObserver<W> {
    fn report(&mut self, event: &SearchEvent<'_, S>) {
        let (label, details) = event_details(event);
        if let Err(err) = self.sink.record(label, details) {
            self.note_failure(label, &err);
        }
    }
}
