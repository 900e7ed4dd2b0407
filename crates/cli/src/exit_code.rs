// Exit codes for the bootdev-sync CLI.
//
//   0 = sync committed (or read-only command succeeded)
//   1 = any failure: no activity, commit failed, unreadable log
//   2 = usage/argument error (raised by clap)

use std::process;

use bootdev_sync_core::SyncOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_outcome(outcome: &SyncOutcome) -> Self {
        if outcome.is_success() {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootdev_sync_common::ActivityRecord;
    use bootdev_sync_core::git::GitWorkerError;

    fn record() -> ActivityRecord {
        ActivityRecord {
            timestamp: "2025-01-01T00:00:00.000000+00:00".into(),
            username: "alice".into(),
            activity_type: "sync".into(),
            message: "Boot.dev activity sync".into(),
        }
    }

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Failure.code(), 1);
        assert_eq!(ExitCode::Usage.code(), 2);
    }

    #[test]
    fn committed_outcome_is_success() {
        let outcome = SyncOutcome::Committed { record: record(), commit_message: "m".into() };
        assert_eq!(ExitCode::from_outcome(&outcome), ExitCode::Success);
    }

    #[test]
    fn other_outcomes_are_failures() {
        let no_activity = SyncOutcome::NoActivity { missing: vec!["BOOTDEV_API_KEY"] };
        let failed = SyncOutcome::CommitFailed {
            record: record(),
            commit_message: "m".into(),
            error: GitWorkerError::SpawnFailed {
                command: "git add -- data/activity.json".into(),
                message: "No such file or directory".into(),
            },
        };
        assert_eq!(ExitCode::from_outcome(&no_activity), ExitCode::Failure);
        assert_eq!(ExitCode::from_outcome(&failed), ExitCode::Failure);
    }
}
