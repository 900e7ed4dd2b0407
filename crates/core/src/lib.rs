// bootdev-sync-core: configuration, activity log, git publishing and the sync engine.

pub mod config;
pub mod fetch;
pub mod git;
pub mod publish;
pub mod store;
pub mod sync;

pub use config::{ConfigOverrides, SyncConfig};
pub use store::{ActivityStore, StoreError};
pub use sync::{ActivitySync, SyncOutcome};
