//! Reading a rotated event log back and dispatching it to subscribers.
//!
//! [`read_event_log`] stitches `<stem>.<ext>`, `<stem>_1.<ext>`, ... back into
//! one ordered event list. [`EventReplay`] walks that list and calls the
//! callbacks subscribed to each event label. Rendering is left to callers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::event_log::{rotated_path, LogRecord};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("event log {} does not exist", path.display())]
    Missing { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed event log {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("log entry number {found} where {expected} was expected")]
    OutOfOrder { expected: u64, found: u64 },
}

/// The first file and every existing rotation after it, in order.
///
/// Rotation discovery stops at the first missing index.
///
/// # Errors
///
/// [`ReplayError::Missing`] if `first` does not exist.
pub fn log_file_sequence(first: &Path) -> Result<Vec<PathBuf>, ReplayError> {
    if !first.exists() {
        return Err(ReplayError::Missing {
            path: first.to_path_buf(),
        });
    }
    let mut files = vec![first.to_path_buf()];
    for index in 1.. {
        let next = rotated_path(first, index);
        if !next.exists() {
            break;
        }
        files.push(next);
    }
    Ok(files)
}

/// Read every record of a rotated log, checking entry numbers run 1, 2, 3, ...
///
/// # Errors
///
/// - [`ReplayError::Missing`] / [`ReplayError::Io`] for unreadable files.
/// - [`ReplayError::Parse`] if a file is not a JSON array of records.
/// - [`ReplayError::OutOfOrder`] if numbering has a gap or repeats.
pub fn read_event_log(first: &Path) -> Result<Vec<LogRecord>, ReplayError> {
    let mut records = Vec::new();
    for path in log_file_sequence(first)? {
        let text = std::fs::read_to_string(&path).map_err(|source| ReplayError::Io {
            path: path.clone(),
            source,
        })?;
        let chunk: Vec<LogRecord> =
            serde_json::from_str(&text).map_err(|source| ReplayError::Parse { path, source })?;
        records.extend(chunk);
    }
    for (expected, record) in (1_u64..).zip(&records) {
        if record.number != expected {
            return Err(ReplayError::OutOfOrder {
                expected,
                found: record.number,
            });
        }
    }
    Ok(records)
}

type Callback = Box<dyn FnMut(&LogRecord, &[LogRecord])>;

struct Subscription {
    labels: BTreeSet<String>,
    callback: Callback,
}

/// Event dispatcher over a recorded log.
///
/// Callbacks receive the current record and the memory: every earlier record
/// whose label was registered with [`EventReplay::memory_subscribe`].
/// Subscribers run in lexicographic id order.
pub struct EventReplay {
    records: Vec<LogRecord>,
    cursor: usize,
    subscriptions: BTreeMap<String, Subscription>,
    memory_labels: BTreeSet<String>,
    memory: Vec<LogRecord>,
}

impl EventReplay {
    #[must_use]
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self {
            records,
            cursor: 0,
            subscriptions: BTreeMap::new(),
            memory_labels: BTreeSet::new(),
            memory: Vec::new(),
        }
    }

    /// Load a rotated log with [`read_event_log`].
    ///
    /// # Errors
    ///
    /// Propagates [`ReplayError`] from [`read_event_log`].
    pub fn from_log(first: &Path) -> Result<Self, ReplayError> {
        Ok(Self::new(read_event_log(first)?))
    }

    /// Attach `callback` to `labels` under `id`.
    ///
    /// Re-using an id replaces its callback and adds `labels` to the ones it
    /// already listens to.
    pub fn subscribe<I, F>(&mut self, id: &str, labels: I, callback: F)
    where
        I: IntoIterator,
        I::Item: Into<String>,
        F: FnMut(&LogRecord, &[LogRecord]) + 'static,
    {
        let labels = labels.into_iter().map(Into::into);
        match self.subscriptions.get_mut(id) {
            Some(sub) => {
                sub.labels.extend(labels);
                sub.callback = Box::new(callback);
            }
            None => {
                self.subscriptions.insert(
                    id.to_string(),
                    Subscription {
                        labels: labels.collect(),
                        callback: Box::new(callback),
                    },
                );
            }
        }
    }

    /// Detach `id` from `labels`. An id left with no labels is removed and
    /// may be reused.
    pub fn unsubscribe<I>(&mut self, id: &str, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let Some(sub) = self.subscriptions.get_mut(id) else {
            return;
        };
        for label in labels {
            sub.labels.remove(&label.into());
        }
        if sub.labels.is_empty() {
            self.subscriptions.remove(id);
        }
    }

    /// Remember records carrying any of `labels` once they are dispatched.
    pub fn memory_subscribe<I>(&mut self, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.memory_labels.extend(labels.into_iter().map(Into::into));
    }

    pub fn memory_unsubscribe<I>(&mut self, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for label in labels {
            self.memory_labels.remove(&label.into());
        }
    }

    #[must_use]
    pub fn is_subscribed(&self, id: &str) -> bool {
        self.subscriptions.contains_key(id)
    }

    #[must_use]
    pub fn memory(&self) -> &[LogRecord] {
        &self.memory
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }

    /// Dispatch the next record. Returns `false` once the log is exhausted.
    pub fn step(&mut self) -> bool {
        let Some(record) = self.records.get(self.cursor) else {
            return false;
        };
        self.cursor += 1;
        for sub in self.subscriptions.values_mut() {
            if sub.labels.contains(&record.event) {
                (sub.callback)(record, &self.memory);
            }
        }
        if self.memory_labels.contains(&record.event) {
            self.memory.push(record.clone());
        }
        true
    }

    /// Dispatch every remaining record and return how many were dispatched.
    pub fn run(&mut self) -> usize {
        let mut dispatched = 0;
        while self.step() {
            dispatched += 1;
        }
        dispatched
    }
}

impl std::fmt::Debug for EventReplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventReplay")
            .field("records", &self.records.len())
            .field("cursor", &self.cursor)
            .field("subscriptions", &self.subscriptions.keys().collect::<Vec<_>>())
            .field("memory_labels", &self.memory_labels)
            .finish_non_exhaustive()
    }
}
