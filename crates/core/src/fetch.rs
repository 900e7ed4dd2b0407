// Activity fetching.
//
// `ActivitySource` is where a real Boot.dev API client would plug in. The
// only implementation today is `PlaceholderSource`, which makes no network
// call and always reports one sync record.

use bootdev_sync_common::ActivityRecord;
use chrono::Local;
use tracing::{info, warn};

use crate::config::SyncConfig;

/// Produces the activity to record for a user.
pub trait ActivitySource {
    /// `None` means there is nothing new to record.
    fn fetch(&self, identity: &str, credential: &str) -> Option<ActivityRecord>;
}

/// Stand-in for the Boot.dev API.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSource;

impl ActivitySource for PlaceholderSource {
    fn fetch(&self, identity: &str, _credential: &str) -> Option<ActivityRecord> {
        info!(user = identity, "placeholder fetch, no Boot.dev API call is made");
        Some(ActivityRecord::sync(identity, Local::now()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(ActivityRecord),
    /// Required settings are absent; the source was not consulted.
    MissingCredentials { missing: Vec<&'static str> },
    /// The source had nothing to report.
    NoNewActivity,
}

impl FetchOutcome {
    pub fn record(&self) -> Option<&ActivityRecord> {
        match self {
            FetchOutcome::Fetched(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<ActivityRecord> {
        match self {
            FetchOutcome::Fetched(record) => Some(record),
            _ => None,
        }
    }
}

/// Ask `source` for activity using the credentials in `config`.
pub fn fetch_activity<S: ActivitySource + ?Sized>(source: &S, config: &SyncConfig) -> FetchOutcome {
    let Some((identity, credential)) = config.credentials() else {
        let missing = config.missing_credentials();
        warn!(missing = ?missing, "credentials not configured, skipping fetch");
        return FetchOutcome::MissingCredentials { missing };
    };

    match source.fetch(identity, credential) {
        Some(record) => FetchOutcome::Fetched(record),
        None => {
            info!(user = identity, "no new activity");
            FetchOutcome::NoNewActivity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CREDENTIAL_KEY, IDENTITY_KEY};
    use bootdev_sync_common::types::{SYNC_ACTIVITY_TYPE, SYNC_MESSAGE};
    use chrono::DateTime;
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn config(identity: Option<&str>, credential: Option<&str>) -> SyncConfig {
        SyncConfig {
            root: PathBuf::from("/tmp/repo"),
            log_path: PathBuf::from("/tmp/repo/data/activity.json"),
            identity: identity.map(str::to_string),
            credential: credential.map(str::to_string),
            settings: BTreeMap::new(),
        }
    }

    struct CountingSource {
        calls: Cell<usize>,
        result: Option<ActivityRecord>,
    }

    impl ActivitySource for CountingSource {
        fn fetch(&self, _identity: &str, _credential: &str) -> Option<ActivityRecord> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn placeholder_returns_one_record_for_identity() {
        let outcome = fetch_activity(&PlaceholderSource, &config(Some("alice"), Some("key")));
        let record = outcome.into_record().expect("record should be fetched");

        assert_eq!(record.username, "alice");
        assert_eq!(record.activity_type, SYNC_ACTIVITY_TYPE);
        assert_eq!(record.message, SYNC_MESSAGE);
        DateTime::parse_from_rfc3339(&record.timestamp).expect("timestamp should be ISO-8601");
    }

    #[test]
    fn missing_identity_skips_source() {
        let source = CountingSource { calls: Cell::new(0), result: None };
        let outcome = fetch_activity(&source, &config(None, Some("key")));

        assert_eq!(outcome, FetchOutcome::MissingCredentials { missing: vec![IDENTITY_KEY] });
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn missing_credential_skips_source() {
        let source = CountingSource { calls: Cell::new(0), result: None };
        let outcome = fetch_activity(&source, &config(Some("alice"), None));

        assert_eq!(outcome, FetchOutcome::MissingCredentials { missing: vec![CREDENTIAL_KEY] });
        assert!(outcome.record().is_none());
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn source_without_activity_is_no_new_activity() {
        let source = CountingSource { calls: Cell::new(0), result: None };
        let outcome = fetch_activity(&source, &config(Some("alice"), Some("key")));

        assert_eq!(outcome, FetchOutcome::NoNewActivity);
        assert_eq!(source.calls.get(), 1);
    }
}
