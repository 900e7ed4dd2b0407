// `bootdev-sync sync` — fetch activity, append it to the log, commit.

use anyhow::Context;
use chrono::Local;
use clap::Args;
use serde::Serialize;

use bootdev_sync_common::ActivityRecord;
use bootdev_sync_core::config::{CREDENTIAL_KEY, IDENTITY_KEY};
use bootdev_sync_core::{ActivitySync, SyncOutcome};

use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat, FAILURE_MARK, SUCCESS_MARK};

use super::GlobalArgs;

#[derive(Debug, Default, Args)]
pub struct SyncArgs {
    /// Print the outcome as one JSON object.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncReport<'a> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a ActivityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<&'a str>,
    #[serde(skip_serializing_if = "no_missing")]
    pub missing: &'a [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> SyncReport<'a> {
    pub fn from_outcome(outcome: &'a SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Committed { record, commit_message } => Self {
                status: "committed",
                record: Some(record),
                commit_message: Some(commit_message.as_str()),
                missing: &[],
                error: None,
            },
            SyncOutcome::NoActivity { missing } => Self {
                status: "no_activity",
                record: None,
                commit_message: None,
                missing,
                error: None,
            },
            SyncOutcome::CommitFailed { record, commit_message, error } => Self {
                status: "commit_failed",
                record: Some(record),
                commit_message: Some(commit_message.as_str()),
                missing: &[],
                error: Some(error.to_string()),
            },
        }
    }
}

fn no_missing(missing: &&[&'static str]) -> bool {
    missing.is_empty()
}

pub fn run(global: &GlobalArgs, args: SyncArgs) -> anyhow::Result<ExitCode> {
    let format = OutputFormat::detect(args.json);
    let config = global.load_config()?;

    if format == OutputFormat::Human {
        println!("{}", banner(&Local::now().format("%Y-%m-%d %H:%M:%S").to_string()));
    }

    let sync = ActivitySync::new(config);
    let outcome = sync.run().context("failed to update activity log")?;

    if let SyncOutcome::NoActivity { missing } = &outcome {
        if !missing.is_empty() {
            output::print_warning(format, &missing_credentials_warning());
        }
    }
    output::print_output(format, &SyncReport::from_outcome(&outcome), format_human)?;

    Ok(ExitCode::from_outcome(&outcome))
}

fn banner(now: &str) -> String {
    format!("=== Boot.dev Activity Sync ===\nTimestamp: {now}\n")
}

fn missing_credentials_warning() -> String {
    format!(
        "{CREDENTIAL_KEY} or {IDENTITY_KEY} not set\nPlease set these environment variables to sync activity"
    )
}

fn format_human(report: &SyncReport<'_>) -> String {
    let mut lines = Vec::new();

    if let Some(record) = report.record {
        lines.push(format!("Fetching activity for user: {}", record.username));
        lines.push("Note: This is a placeholder. Implement Boot.dev API integration.".to_string());
    }

    match report.status {
        "committed" => {
            lines.push(format!(
                "{SUCCESS_MARK} Created commit: {}",
                report.commit_message.unwrap_or_default()
            ));
            lines.push(String::new());
            lines.push(format!("{SUCCESS_MARK} Sync completed successfully"));
        }
        "commit_failed" => {
            lines.push(format!(
                "Error creating commit: {}",
                report.error.as_deref().unwrap_or("unknown error")
            ));
            lines.push(String::new());
            lines.push(format!("{FAILURE_MARK} Failed to create commit"));
        }
        _ => {
            if report.missing.is_empty() {
                lines.push("No new activity".to_string());
            }
            lines.push(String::new());
            lines.push(format!("{FAILURE_MARK} No activity to sync"));
        }
    }

    lines.join("\n")
}
