// Core domain types shared across all bootdev-sync crates.

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Activity type tag written by the placeholder fetcher.
pub const SYNC_ACTIVITY_TYPE: &str = "sync";

/// Message written by the placeholder fetcher.
pub const SYNC_MESSAGE: &str = "Boot.dev activity sync";

/// Prefix for every commit the publisher creates.
pub const COMMIT_MESSAGE_PREFIX: &str = "Boot.dev activity: ";

/// One logged sync event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRecord {
    /// ISO-8601 timestamp taken at fetch time. Kept as a string so logs
    /// written by older tooling (naive local time) still load.
    pub timestamp: String,
    pub username: String,
    pub activity_type: String,
    pub message: String,
}

impl ActivityRecord {
    /// Build the placeholder sync record for `username` at `at`.
    pub fn sync<Tz>(username: impl Into<String>, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            username: username.into(),
            activity_type: SYNC_ACTIVITY_TYPE.to_string(),
            message: SYNC_MESSAGE.to_string(),
        }
    }

    /// Commit message used when this record is published.
    pub fn commit_message(&self) -> String {
        let message = self.message.trim();
        let message = if message.is_empty() { SYNC_ACTIVITY_TYPE } else { message };
        format!("{COMMIT_MESSAGE_PREFIX}{message}")
    }
}

/// The persisted, append-only activity log.
///
/// `syncs` is in insertion order. Unknown top-level keys are carried through
/// load/save untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityLog {
    pub syncs: Vec<ActivityRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityLog {
    pub fn push(&mut self, record: ActivityRecord) {
        self.syncs.push(record);
    }

    pub fn len(&self) -> usize {
        self.syncs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syncs.is_empty()
    }

    /// Most recently appended record.
    pub fn last(&self) -> Option<&ActivityRecord> {
        self.syncs.last()
    }
}
