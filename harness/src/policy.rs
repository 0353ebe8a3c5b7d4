//! Run policy: the declared conditions of a harness run.
//!
//! A policy names the frontier strategy, an optional expansion budget and an
//! optional event log. It is plain data: loadable from JSON, validated once,
//! and hashed into a [`ContentHash`] so reports can commit to the policy
//! they ran under.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use wayfinder_kernel::proof::canon::canonical_json_bytes;
use wayfinder_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use wayfinder_search::frontier::FrontierKind;

use crate::event_log::EventLogConfig;

/// Where and how to write the event log for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTarget {
    pub path: PathBuf,
    #[serde(flatten)]
    pub config: EventLogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunPolicy {
    pub frontier: FrontierKind,
    /// Maximum number of expansions. `None` runs until solved or exhausted.
    #[serde(default)]
    pub expansion_budget: Option<u64>,
    #[serde(default)]
    pub log: Option<LogTarget>,
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("run policy is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid run policy: {detail}")]
    Invalid { detail: String },
}

impl RunPolicy {
    /// Unbounded, unlogged run with `frontier`.
    #[must_use]
    pub fn new(frontier: FrontierKind) -> Self {
        Self {
            frontier,
            expansion_budget: None,
            log: None,
        }
    }

    #[must_use]
    pub fn with_budget(mut self, expansions: u64) -> Self {
        self.expansion_budget = Some(expansions);
        self
    }

    #[must_use]
    pub fn with_log(mut self, path: impl Into<PathBuf>, config: EventLogConfig) -> Self {
        self.log = Some(LogTarget {
            path: path.into(),
            config,
        });
        self
    }

    /// Parse and validate a JSON policy.
    ///
    /// ```text
    /// {"frontier": "astar", "expansion_budget": 500,
    ///  "log": {"path": "out/search.json", "max_lines_per_file": 2000}}
    /// ```
    ///
    /// # Errors
    ///
    /// [`PolicyError::Parse`] for malformed JSON or an unknown frontier name,
    /// [`PolicyError::Invalid`] if [`Self::validate`] fails.
    pub fn from_json_str(text: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// # Errors
    ///
    /// [`PolicyError::Invalid`] if the log line threshold is zero or the log
    /// path is empty.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if let Some(log) = &self.log {
            if log.path.as_os_str().is_empty() {
                return Err(PolicyError::Invalid {
                    detail: "log path is empty".into(),
                });
            }
            if log.config.max_lines_per_file == 0 {
                return Err(PolicyError::Invalid {
                    detail: "log max_lines_per_file must be positive".into(),
                });
            }
        }
        Ok(())
    }

    /// Content hash of the policy's canonical JSON form.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Parse`] if the policy cannot be converted to JSON
    /// (only possible for non-UTF-8 log paths).
    pub fn digest(&self) -> Result<ContentHash, PolicyError> {
        let value = serde_json::to_value(self)?;
        Ok(canonical_hash(
            HashDomain::RunPolicy,
            &canonical_json_bytes(&value),
        ))
    }
}
