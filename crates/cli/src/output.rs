// Output rendering for the CLI.
//
// Human-readable status lines by default. `--json` switches a command to a
// single JSON object on stdout. Diagnostics from `tracing` go to stderr and
// are independent of both.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

pub const SUCCESS_MARK: &str = "✓";
pub const FAILURE_MARK: &str = "✗";

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Status lines for an operator or a cron log.
    Human,
    /// Machine-readable JSON (one object per invocation).
    Json,
}

impl OutputFormat {
    pub fn detect(json_flag: bool) -> Self {
        if json_flag {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Write a value to stdout in the selected format.
pub fn print_output<T, F>(format: OutputFormat, value: &T, human_fn: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let mut out = io::stdout().lock();
    write_output(&mut out, format, value, human_fn)
}

/// Write a value to a provided writer (useful for testing).
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    human_fn: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => {
            writeln!(writer, "{}", human_fn(value))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Write an error to stderr in the selected format.
pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    let mut err = io::stderr().lock();
    match format {
        OutputFormat::Human => {
            let line =
                render_human_stderr_line(FAILURE_MARK, message, io::stderr().is_terminal(), ANSI_RED);
            let _ = writeln!(err, "{line}");
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            });
            let _ = serde_json::to_writer(&mut err, &obj);
            let _ = writeln!(err);
        }
    }
}

/// Write a warning to stderr. JSON mode stays quiet; the report carries it.
pub fn print_warning(format: OutputFormat, message: &str) {
    if format == OutputFormat::Json {
        return;
    }
    let mut err = io::stderr().lock();
    let line =
        render_human_stderr_line("Warning:", message, io::stderr().is_terminal(), ANSI_YELLOW);
    let _ = writeln!(err, "{line}");
}

fn render_human_stderr_line(label: &str, message: &str, is_tty: bool, color: &str) -> String {
    if is_tty {
        format!("{color}{label}{ANSI_RESET} {message}")
    } else {
        format!("{label} {message}")
    }
}
