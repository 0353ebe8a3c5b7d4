//! Chunked JSON event log.
//!
//! # File format
//!
//! Each file is a pretty-printed JSON array of records:
//!
//! ```text
//! [
//!     {
//!         "Event": "Extract",
//!         "Entry": { ... },
//!         "Log Entry Number": 1
//!     },
//!     ...
//! ]
//! ```
//!
//! # Rotation
//!
//! The first file is the configured path. When appending the next record
//! would push the active file past `max_lines_per_file` lines (closing `]`
//! included), the array is closed and `<stem>_<n>.<ext>` is opened, `n`
//! counting from 1. A file always receives at least one record, so a record
//! longer than the threshold still lands somewhere. `Log Entry Number` is
//! global across rotations and starts at 1.
//!
//! Opening a log deletes rotations an earlier log left at the same path, so a
//! reader that walks `_1`, `_2`, ... until one is missing sees only this log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder recorded when an entry cannot be serialized.
pub const UNREPRESENTABLE_ENTRY: &str = "<unrepresentable entry>";

const DEFAULT_MAX_LINES_PER_FILE: usize = 10_000;
const INDENT: &str = "    ";

/// Writer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogConfig {
    /// Line threshold that triggers rotation. Must be positive.
    pub max_lines_per_file: usize,
    /// Create a missing parent directory instead of failing.
    pub create_parent: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            max_lines_per_file: DEFAULT_MAX_LINES_PER_FILE,
            create_parent: false,
        }
    }
}

/// One persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Entry")]
    pub entry: serde_json::Value,
    #[serde(rename = "Log Entry Number")]
    pub number: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum LogWriteError {
    #[error("parent directory {} does not exist", dir.display())]
    MissingParent { dir: PathBuf },

    #[error("invalid event log config: {detail}")]
    InvalidConfig { detail: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no event log file is open")]
    NotOpen,
}

/// Path of rotation `index` for `base`. Index 0 is `base` itself.
#[must_use]
pub fn rotated_path(base: &Path, index: u32) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };
    base.with_file_name(name)
}

/// Object entry assembled one field at a time.
///
/// Each field is serialized on its own. A value that cannot become JSON is
/// recorded as its `Debug` text and the other fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEntry {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl LogEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` under the `Display` text of `key`.
    #[must_use]
    pub fn field<K, T>(mut self, key: &K, value: &T) -> Self
    where
        K: std::fmt::Display + ?Sized,
        T: Serialize + std::fmt::Debug + ?Sized,
    {
        let key = key.to_string();
        let value = serde_json::to_value(value).unwrap_or_else(|err| {
            tracing::warn!(field = %key, error = %err, "log field is not representable as JSON; using its debug text");
            serde_json::Value::String(format!("{value:?}"))
        });
        self.fields.insert(key, value);
        self
    }

    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.fields)
    }
}

/// Delete `<stem>_1.<ext>`, `<stem>_2.<ext>`, ... left by an earlier log at
/// `base`, stopping at the first missing index.
fn remove_stale_rotations(base: &Path) -> Result<(), LogWriteError> {
    for index in 1.. {
        let path = rotated_path(base, index);
        if !path.exists() {
            break;
        }
        std::fs::remove_file(&path).map_err(|source| LogWriteError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "removed stale event log rotation");
    }
    Ok(())
}

struct ActiveFile {
    path: PathBuf,
    out: BufWriter<File>,
    lines: usize,
    records: usize,
}

/// Rotating writer for [`LogRecord`]s.
pub struct EventLogWriter {
    base: PathBuf,
    config: EventLogConfig,
    active: Option<ActiveFile>,
    rotation: u32,
    next_number: u64,
    files: Vec<PathBuf>,
}

impl EventLogWriter {
    /// Open the first file of a log at `path`.
    ///
    /// # Errors
    ///
    /// - [`LogWriteError::InvalidConfig`] if `max_lines_per_file` is 0.
    /// - [`LogWriteError::MissingParent`] if the parent directory is missing
    ///   and `create_parent` is false.
    /// - [`LogWriteError::Io`] if the directory or file cannot be created.
    pub fn open(path: impl Into<PathBuf>, config: EventLogConfig) -> Result<Self, LogWriteError> {
        if config.max_lines_per_file == 0 {
            return Err(LogWriteError::InvalidConfig {
                detail: "max_lines_per_file must be positive".into(),
            });
        }
        let base = path.into();
        if let Some(dir) = base.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                if !config.create_parent {
                    return Err(LogWriteError::MissingParent {
                        dir: dir.to_path_buf(),
                    });
                }
                std::fs::create_dir_all(dir).map_err(|source| LogWriteError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }
        remove_stale_rotations(&base)?;
        let mut writer = Self {
            base,
            config,
            active: None,
            rotation: 0,
            next_number: 1,
            files: Vec::new(),
        };
        writer.open_rotation()?;
        Ok(writer)
    }

    #[must_use]
    pub fn config(&self) -> &EventLogConfig {
        &self.config
    }

    /// Files opened so far, in rotation order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number the next record will receive.
    #[must_use]
    pub fn next_entry_number(&self) -> u64 {
        self.next_number
    }

    /// Append a record and return its entry number.
    ///
    /// # Errors
    ///
    /// [`LogWriteError::Io`] on write failure, [`LogWriteError::NotOpen`]
    /// if an earlier rotation failed and no file is open.
    pub fn write_event(&mut self, event: &str, entry: serde_json::Value) -> Result<u64, LogWriteError> {
        let number = self.next_number;
        let record = LogRecord {
            event: event.to_string(),
            entry,
            number,
        };
        let text = render_record(&record).unwrap_or_else(|err| {
            tracing::warn!(event, error = %err, "failed to render log record; using placeholder");
            placeholder_text(event, number)
        });
        let record_lines = text.lines().count();

        let needs_rotation = self.active.as_ref().is_some_and(|f| {
            f.records > 0 && f.lines + record_lines > self.config.max_lines_per_file
        });
        if needs_rotation {
            self.close_active()?;
            self.rotation += 1;
            self.open_rotation()?;
        }

        let active = self.active.as_mut().ok_or(LogWriteError::NotOpen)?;
        let sep = if active.records == 0 { "\n" } else { ",\n" };
        let chunk = format!("{sep}{text}");
        if let Err(source) = active.out.write_all(chunk.as_bytes()) {
            return Err(LogWriteError::Io {
                path: active.path.clone(),
                source,
            });
        }
        active.lines += record_lines;
        active.records += 1;
        self.next_number += 1;
        Ok(number)
    }

    /// Append a record whose entry is any serializable value.
    ///
    /// A value that fails to serialize is replaced by [`UNREPRESENTABLE_ENTRY`]
    /// and the failure is logged; the record is still written.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_event`].
    pub fn write_serialized<T: Serialize + ?Sized>(
        &mut self,
        event: &str,
        entry: &T,
    ) -> Result<u64, LogWriteError> {
        let value = serde_json::to_value(entry).unwrap_or_else(|err| {
            tracing::warn!(event, error = %err, "log entry is not representable as JSON");
            serde_json::Value::String(UNREPRESENTABLE_ENTRY.to_string())
        });
        self.write_event(event, value)
    }

    /// Append a record built field by field with [`LogEntry`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_event`].
    pub fn write_entry(&mut self, event: &str, entry: LogEntry) -> Result<u64, LogWriteError> {
        self.write_event(event, entry.into_value())
    }

    /// Close the active array and return every file written.
    ///
    /// # Errors
    ///
    /// [`LogWriteError::Io`] if the final flush fails.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, LogWriteError> {
        self.close_active()?;
        Ok(std::mem::take(&mut self.files))
    }

    fn open_rotation(&mut self) -> Result<(), LogWriteError> {
        let path = rotated_path(&self.base, self.rotation);
        let file = File::create(&path).map_err(|source| LogWriteError::Io {
            path: path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        out.write_all(b"[").map_err(|source| LogWriteError::Io {
            path: path.clone(),
            source,
        })?;
        if self.rotation > 0 {
            tracing::debug!(path = %path.display(), rotation = self.rotation, "event log rotated");
        }
        self.files.push(path.clone());
        self.active = Some(ActiveFile {
            path,
            out,
            // `[` and the closing `]`.
            lines: 2,
            records: 0,
        });
        Ok(())
    }

    fn close_active(&mut self) -> Result<(), LogWriteError> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };
        let result = active
            .out
            .write_all(b"\n]\n")
            .and_then(|()| active.out.flush());
        result.map_err(|source| LogWriteError::Io {
            path: active.path,
            source,
        })
    }
}

impl Drop for EventLogWriter {
    fn drop(&mut self) {
        if let Err(err) = self.close_active() {
            tracing::warn!(error = %err, "failed to close event log on drop");
        }
    }
}

impl std::fmt::Debug for EventLogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogWriter")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("rotation", &self.rotation)
            .field("next_number", &self.next_number)
            .finish_non_exhaustive()
    }
}

/// Pretty-print a record with 4-space indentation, nested one level so it
/// sits inside the file's top-level array.
fn render_record(record: &LogRecord) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    let body = String::from_utf8_lossy(&buf);
    let indented: Vec<String> = body
        .lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect();
    Ok(indented.join("\n"))
}

fn placeholder_text(event: &str, number: u64) -> String {
    let event = serde_json::Value::String(event.to_string());
    format!(
        "    {{\n        \"Event\": {event},\n        \"Entry\": \"{UNREPRESENTABLE_ENTRY}\",\n        \"Log Entry Number\": {number}\n    }}"
    )
}
