// CLI subcommand dispatch.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use bootdev_sync_core::{ConfigOverrides, SyncConfig};

use crate::exit_code::ExitCode;
use crate::output::OutputFormat;

pub mod log;
pub mod sync;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch activity, append it to the log and commit (default)
    Sync(sync::SyncArgs),
    /// Show recorded syncs
    Log(log::LogArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Sync(sync::SyncArgs::default())
    }
}

impl Command {
    /// Format for everything the command prints, including an error that
    /// ends it early.
    pub fn format(&self) -> OutputFormat {
        let json = match self {
            Self::Sync(args) => args.json,
            Self::Log(args) => args.json,
        };
        OutputFormat::detect(json)
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Repository root. The settings file and activity log live under it.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file to read instead of `<root>/.env`.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Activity log path (relative paths resolve against the root).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> anyhow::Result<SyncConfig> {
        let overrides = ConfigOverrides {
            settings_file: self.env_file.clone(),
            log_path: self.log_file.clone(),
        };
        SyncConfig::load(self.root.clone(), &overrides).context("failed to load configuration")
    }
}

pub fn run(global: &GlobalArgs, cmd: Command) -> anyhow::Result<ExitCode> {
    match cmd {
        Command::Sync(args) => sync::run(global, args),
        Command::Log(args) => log::run(global, args),
    }
}
