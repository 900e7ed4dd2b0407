// Configuration for a sync invocation.
//
// Settings file: `<root>/.env` (`KEY=VALUE`, `#` comments)
// Activity log:  `<root>/data/activity.json`
//
// Values from the settings file win over the process environment. Nothing is
// written back into the environment; callers get an explicit `SyncConfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Environment/settings key holding the Boot.dev username.
pub const IDENTITY_KEY: &str = "BOOTDEV_USERNAME";
/// Environment/settings key holding the Boot.dev API key.
pub const CREDENTIAL_KEY: &str = "BOOTDEV_API_KEY";

pub const SETTINGS_FILE_NAME: &str = ".env";
pub const DEFAULT_LOG_PATH: &str = "data/activity.json";

/// Path to the settings file: `<root>/.env`.
pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Path to the activity log: `<root>/data/activity.json`.
pub fn default_log_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_LOG_PATH)
}

/// Read `KEY=VALUE` pairs from an optional settings file, in file order.
///
/// A missing file yields no pairs. Blank and `#` lines are ignored. Each other
/// line is split on its first `=`; nothing is unquoted or substituted. Lines
/// without `=` are skipped with a warning.
pub fn load_settings_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file");
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let pairs = parse_settings(&contents, path);

    debug!(path = %path.display(), count = pairs.len(), "loaded settings file");
    Ok(pairs)
}

fn parse_settings(contents: &str, path: &Path) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => pairs.push((key.to_string(), value.to_string())),
            None => {
                warn!(path = %path.display(), line = index + 1, "skipping settings line without `=`");
            }
        }
    }
    pairs
}

/// Caller-supplied overrides, typically from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Settings file to read instead of `<root>/.env`.
    pub settings_file: Option<PathBuf>,
    /// Activity log path. Relative paths resolve against the root.
    pub log_path: Option<PathBuf>,
}

/// Everything a sync invocation needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Repository root; git runs here.
    pub root: PathBuf,
    pub log_path: PathBuf,
    /// Boot.dev username. `None` when unset or empty.
    pub identity: Option<String>,
    /// Boot.dev API key. `None` when unset or empty.
    pub credential: Option<String>,
    /// Every pair read from the settings file.
    pub settings: BTreeMap<String, String>,
}

impl SyncConfig {
    /// Load from the settings file and the process environment.
    pub fn load(root: impl Into<PathBuf>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(root, overrides, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup.
    pub fn load_with_env<F>(
        root: impl Into<PathBuf>,
        overrides: &ConfigOverrides,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = root.into();
        let settings_file = overrides.settings_file.clone().unwrap_or_else(|| settings_path(&root));
        let settings: BTreeMap<String, String> =
            load_settings_file(&settings_file)?.into_iter().collect();

        let resolve = |key: &str| {
            settings
                .get(key)
                .cloned()
                .or_else(|| env(key))
                .filter(|value| !value.trim().is_empty())
        };
        let identity = resolve(IDENTITY_KEY);
        let credential = resolve(CREDENTIAL_KEY);

        let log_path = match &overrides.log_path {
            Some(path) => root.join(path),
            None => default_log_path(&root),
        };

        Ok(Self { root, log_path, identity, credential, settings })
    }

    /// Identity and credential, when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.identity.as_deref()?, self.credential.as_deref()?))
    }

    /// Names of the required keys that are absent.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.credential.is_none() {
            missing.push(CREDENTIAL_KEY);
        }
        if self.identity.is_none() {
            missing.push(IDENTITY_KEY);
        }
        missing
    }

    /// Raw value from the settings file.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file `{}`: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
}
