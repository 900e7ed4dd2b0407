// Activity log persistence at `<root>/data/activity.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bootdev_sync_common::{ActivityLog, ActivityRecord};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Reads and writes the JSON activity log.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<ActivityLog, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "activity log not found, starting empty");
            return Ok(ActivityLog::default());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        serde_json::from_str(&contents)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    /// Replace the log file with `log`, indented with two spaces.
    ///
    /// The document is written to a temp file beside the target and renamed
    /// over it, so readers see either the old or the new log in full.
    pub fn save(&self, log: &ActivityLog) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(log).map_err(StoreError::Serialize)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .map_err(|source| StoreError::Io { path: parent.clone(), source })?;

        let mut tmp = NamedTempFile::new_in(&parent)
            .map_err(|source| StoreError::Io { path: parent.clone(), source })?;
        let tmp_file = tmp.path().to_path_buf();
        let tmp_io = |source: std::io::Error| StoreError::Io { path: tmp_file.clone(), source };
        tmp.write_all(contents.as_bytes()).map_err(tmp_io)?;
        tmp.flush().map_err(tmp_io)?;
        tmp.as_file().sync_all().map_err(tmp_io)?;

        tmp.persist(&self.path)
            .map_err(|error| StoreError::Io { path: self.path.clone(), source: error.error })?;

        debug!(path = %self.path.display(), records = log.len(), "activity log saved");
        Ok(())
    }

    /// Load, append `record`, save. Returns the updated log.
    pub fn append(&self, record: ActivityRecord) -> Result<ActivityLog, StoreError> {
        let mut log = self.load()?;
        log.push(record);
        self.save(&log)?;
        info!(path = %self.path.display(), records = log.len(), "appended activity record");
        Ok(log)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("activity log I/O error at `{}`: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("activity log `{}` is not a valid log document: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to serialize activity log: {0}")]
    Serialize(serde_json::Error),
}
