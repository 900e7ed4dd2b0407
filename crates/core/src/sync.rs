// One sync invocation: fetch → append → persist → commit.

use bootdev_sync_common::ActivityRecord;
use tracing::info;

use crate::config::SyncConfig;
use crate::fetch::{fetch_activity, ActivitySource, FetchOutcome, PlaceholderSource};
use crate::git::{CommandExecutor, GitWorker, GitWorkerError, ProcessCommandExecutor};
use crate::publish::{PublishOutcome, Publisher};
use crate::store::{ActivityStore, StoreError};

/// How a sync invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Committed { record: ActivityRecord, commit_message: String },
    /// Nothing was fetched. `missing` names absent credentials, if that was
    /// the reason.
    NoActivity { missing: Vec<&'static str> },
    /// The record is in the log file but the commit did not happen.
    CommitFailed { record: ActivityRecord, commit_message: String, error: GitWorkerError },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Committed { .. })
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

pub struct ActivitySync<S = PlaceholderSource, E = ProcessCommandExecutor> {
    config: SyncConfig,
    source: S,
    publisher: Publisher<E>,
}

impl ActivitySync<PlaceholderSource, ProcessCommandExecutor> {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_parts(config, PlaceholderSource, ProcessCommandExecutor)
    }
}

impl<S: ActivitySource, E: CommandExecutor> ActivitySync<S, E> {
    pub fn with_parts(config: SyncConfig, source: S, executor: E) -> Self {
        let store = ActivityStore::new(config.log_path.clone());
        let git = GitWorker::with_executor(config.root.clone(), executor);
        Self { config, source, publisher: Publisher::with_git(store, git) }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &ActivityStore {
        self.publisher.store()
    }

    pub fn run(&self) -> Result<SyncOutcome, StoreError> {
        let fetched = fetch_activity(&self.source, &self.config);
        let record = match fetched {
            FetchOutcome::Fetched(record) => record,
            FetchOutcome::MissingCredentials { missing } => {
                return Ok(SyncOutcome::NoActivity { missing });
            }
            FetchOutcome::NoNewActivity => {
                return Ok(SyncOutcome::NoActivity { missing: Vec::new() });
            }
        };

        info!(user = %record.username, "fetched activity");
        let outcome = match self.publisher.publish(Some(&record))? {
            PublishOutcome::Committed { commit_message, .. } => {
                SyncOutcome::Committed { record, commit_message }
            }
            PublishOutcome::CommitFailed { commit_message, error } => {
                SyncOutcome::CommitFailed { record, commit_message, error }
            }
            PublishOutcome::NothingToCommit => SyncOutcome::NoActivity { missing: Vec::new() },
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, CREDENTIAL_KEY, IDENTITY_KEY};
    use crate::git::worker::tests::{failed, ok, MockExecutor};
    use bootdev_sync_common::types::SYNC_MESSAGE;
    use tempfile::TempDir;

    fn config_with(dir: &TempDir, settings: &str) -> SyncConfig {
        std::fs::write(dir.path().join(".env"), settings).unwrap();
        SyncConfig::load_with_env(dir.path(), &ConfigOverrides::default(), |_| None).unwrap()
    }

    #[test]
    fn missing_log_and_one_record_commits_and_exits_zero() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "BOOTDEV_USERNAME=alice\nBOOTDEV_API_KEY=key\n");
        let mock = MockExecutor::new(vec![ok(""), ok("")]);
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, mock.clone());

        let outcome = sync.run().unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code(), 0);
        let raw = std::fs::read_to_string(dir.path().join("data/activity.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let syncs = value["syncs"].as_array().expect("syncs array");
        assert_eq!(syncs.len(), 1);
        assert_eq!(syncs[0]["username"], "alice");
        assert_eq!(syncs[0]["message"], SYNC_MESSAGE);
        assert_eq!(mock.calls().len(), 2);
    }

    #[test]
    fn unset_credentials_exit_one_and_leave_log_alone() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "# nothing configured\n");
        let mock = MockExecutor::new(Vec::new());
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, mock.clone());

        let outcome = sync.run().unwrap();

        assert_eq!(outcome, SyncOutcome::NoActivity { missing: vec![CREDENTIAL_KEY, IDENTITY_KEY] });
        assert_eq!(outcome.exit_code(), 1);
        assert!(!sync.store().path().exists());
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn unset_credentials_do_not_touch_existing_log() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "BOOTDEV_USERNAME=alice\n");
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        let existing = "{\n  \"syncs\": []\n}";
        std::fs::write(dir.path().join("data/activity.json"), existing).unwrap();
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, MockExecutor::new(Vec::new()));

        assert!(!sync.run().unwrap().is_success());
        assert_eq!(std::fs::read_to_string(sync.store().path()).unwrap(), existing);
    }

    #[test]
    fn commit_failure_exits_one_with_record_persisted() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "BOOTDEV_USERNAME=alice\nBOOTDEV_API_KEY=key\n");
        let mock = MockExecutor::new(vec![ok(""), failed(1, "", "error: nothing to commit\n")]);
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, mock);

        let outcome = sync.run().unwrap();

        match &outcome {
            SyncOutcome::CommitFailed { record, commit_message, .. } => {
                assert_eq!(record.username, "alice");
                assert_eq!(commit_message, "Boot.dev activity: Boot.dev activity sync");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(sync.store().load().unwrap().len(), 1);
    }

    #[test]
    fn repeated_runs_append_in_order() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "BOOTDEV_USERNAME=alice\nBOOTDEV_API_KEY=key\n");
        let mock = MockExecutor::new(vec![ok(""), ok(""), ok(""), ok(""), ok(""), ok("")]);
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, mock);

        let mut records = Vec::new();
        for _ in 0..3 {
            match sync.run().unwrap() {
                SyncOutcome::Committed { record, .. } => records.push(record),
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(sync.store().load().unwrap().syncs, records);
    }

    #[test]
    fn malformed_log_propagates_as_error() {
        let dir = TempDir::new().unwrap();
        let cfg = config_with(&dir, "BOOTDEV_USERNAME=alice\nBOOTDEV_API_KEY=key\n");
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/activity.json"), "{ broken").unwrap();
        let sync = ActivitySync::with_parts(cfg, PlaceholderSource, MockExecutor::new(Vec::new()));

        assert!(matches!(sync.run(), Err(StoreError::Parse { .. })));
    }
}
