// Git capability: stage and commit through an injectable command executor.

pub mod worker;

pub use worker::{CommandExecutor, GitWorker, GitWorkerError, ProcessCommandExecutor};
