use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Failure of a single git invocation. `command` is the rendered command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitWorkerError {
    #[error("failed to run `{command}`: {message}")]
    SpawnFailed { command: String, message: String },
    /// Non-zero exit. `stderr` falls back to stdout when git wrote nothing to
    /// stderr ("nothing to commit" goes to stdout).
    #[error("`{command}` {}: {}", exit_status(.code), .stderr.trim())]
    CommandFailed { command: String, code: Option<i32>, stderr: String },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program to completion.
///
/// The production implementation spawns a real process; tests substitute a
/// recording fake.
pub trait CommandExecutor: Send + Sync {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandResult, std::io::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCommandExecutor;

impl CommandExecutor for ProcessCommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandResult, std::io::Error> {
        let output = Command::new(program).args(args).current_dir(cwd).output()?;
        Ok(CommandResult {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Commits a single file of a working tree.
#[derive(Debug, Clone)]
pub struct GitWorker<E = ProcessCommandExecutor> {
    repo_path: PathBuf,
    executor: E,
}

impl GitWorker<ProcessCommandExecutor> {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self { repo_path: repo_path.into(), executor: ProcessCommandExecutor }
    }
}

impl<E: CommandExecutor> GitWorker<E> {
    pub fn with_executor(repo_path: impl Into<PathBuf>, executor: E) -> Self {
        Self { repo_path: repo_path.into(), executor }
    }

    /// `git add -- <file>` then `git commit -m <message>`. The commit is not
    /// attempted when staging fails.
    pub fn commit_file(&self, file: &Path, message: &str) -> Result<(), GitWorkerError> {
        let pathspec = self.pathspec(file);
        self.git(&["add", "--", &pathspec])?;
        self.git(&["commit", "-m", message])
    }

    /// `file` relative to the repository when it lives inside it, as given.
    pub fn pathspec(&self, file: &Path) -> String {
        file.strip_prefix(&self.repo_path).unwrap_or(file).to_string_lossy().into_owned()
    }

    fn git(&self, args: &[&str]) -> Result<(), GitWorkerError> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        let command = format!("git {}", args.join(" "));
        debug!(%command, cwd = %self.repo_path.display(), "running git");

        let result = self.executor.execute("git", &args, &self.repo_path).map_err(|error| {
            GitWorkerError::SpawnFailed { command: command.clone(), message: error.to_string() }
        })?;
        if result.success {
            return Ok(());
        }

        let stderr = if result.stderr.trim().is_empty() { result.stdout } else { result.stderr };
        Err(GitWorkerError::CommandFailed { command, code: result.code, stderr })
    }
}
