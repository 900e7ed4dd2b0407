// Commit publishing: append the record, persist the log, stage and commit it.
//
// A commit failure leaves the already-persisted log in place; the next
// successful run commits it along with its own record.

use std::path::PathBuf;

use bootdev_sync_common::{ActivityLog, ActivityRecord};
use tracing::{error, info};

use crate::git::{CommandExecutor, GitWorker, GitWorkerError, ProcessCommandExecutor};
use crate::store::{ActivityStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// No record was given; nothing was touched.
    NothingToCommit,
    Committed { commit_message: String, log: ActivityLog },
    /// The log was persisted but staging or committing it failed.
    CommitFailed { commit_message: String, error: GitWorkerError },
}

impl PublishOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, PublishOutcome::Committed { .. })
    }
}

pub struct Publisher<E = ProcessCommandExecutor> {
    store: ActivityStore,
    git: GitWorker<E>,
}

impl Publisher<ProcessCommandExecutor> {
    pub fn new(store: ActivityStore, repo_root: impl Into<PathBuf>) -> Self {
        Self { store, git: GitWorker::new(repo_root) }
    }
}

impl<E: CommandExecutor> Publisher<E> {
    pub fn with_git(store: ActivityStore, git: GitWorker<E>) -> Self {
        Self { store, git }
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    /// Publish `record`, if any.
    ///
    /// Store errors (unreadable or malformed log) are returned as `Err`; git
    /// failures are reported through `PublishOutcome::CommitFailed`.
    pub fn publish(&self, record: Option<&ActivityRecord>) -> Result<PublishOutcome, StoreError> {
        let Some(record) = record else {
            info!("no activity to commit");
            return Ok(PublishOutcome::NothingToCommit);
        };

        let log = self.store.append(record.clone())?;
        let commit_message = record.commit_message();

        match self.git.commit_file(self.store.path(), &commit_message) {
            Ok(()) => {
                info!(%commit_message, records = log.len(), "created activity commit");
                Ok(PublishOutcome::Committed { commit_message, log })
            }
            Err(error) => {
                error!(%error, path = %self.store.path().display(), "failed to commit activity log");
                Ok(PublishOutcome::CommitFailed { commit_message, error })
            }
        }
    }
}
