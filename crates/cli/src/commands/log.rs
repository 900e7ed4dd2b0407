// `bootdev-sync log` — show recorded syncs without touching anything.

use anyhow::Context;
use clap::Args;

use bootdev_sync_common::ActivityLog;
use bootdev_sync_core::ActivityStore;

use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

use super::GlobalArgs;

#[derive(Debug, Default, Args)]
pub struct LogArgs {
    /// Only show the most recent N syncs.
    #[arg(long)]
    limit: Option<usize>,

    /// Print the log document as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

pub fn run(global: &GlobalArgs, args: LogArgs) -> anyhow::Result<ExitCode> {
    let format = OutputFormat::detect(args.json);
    let config = global.load_config()?;
    let store = ActivityStore::new(&config.log_path);

    let log = store.load().context("failed to read activity log")?;
    let log = tail(log, args.limit);

    output::print_output(format, &log, format_human)?;
    Ok(ExitCode::Success)
}

fn tail(mut log: ActivityLog, limit: Option<usize>) -> ActivityLog {
    if let Some(limit) = limit {
        let skip = log.syncs.len().saturating_sub(limit);
        log.syncs.drain(..skip);
    }
    log
}

fn format_human(log: &ActivityLog) -> String {
    if log.is_empty() {
        return "No syncs recorded".to_string();
    }

    log.syncs
        .iter()
        .map(|record| {
            format!(
                "{}  {}  {}  {}",
                record.timestamp, record.username, record.activity_type, record.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootdev_sync_common::ActivityRecord;

    fn log_of(names: &[&str]) -> ActivityLog {
        let mut log = ActivityLog::default();
        for (index, name) in names.iter().enumerate() {
            log.push(ActivityRecord {
                timestamp: format!("t{index}"),
                username: name.to_string(),
                activity_type: "sync".into(),
                message: "Boot.dev activity sync".into(),
            });
        }
        log
    }

    #[test]
    fn tail_keeps_most_recent_in_order() {
        let log = tail(log_of(&["a", "b", "c", "d"]), Some(2));
        let names: Vec<_> = log.syncs.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[test]
    fn tail_larger_than_log_keeps_everything() {
        assert_eq!(tail(log_of(&["a"]), Some(10)).len(), 1);
        assert_eq!(tail(log_of(&["a", "b"]), None).len(), 2);
    }

    #[test]
    fn human_lists_one_line_per_sync() {
        let text = format_human(&log_of(&["alice", "bob"]));
        assert_eq!(
            text,
            "t0  alice  sync  Boot.dev activity sync\nt1  bob  sync  Boot.dev activity sync"
        );
    }

    #[test]
    fn human_reports_empty_log() {
        assert_eq!(format_human(&ActivityLog::default()), "No syncs recorded");
    }
}
