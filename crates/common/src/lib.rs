// bootdev-sync-common: shared types for the bootdev-sync workspace

pub mod types;

pub use types::{ActivityLog, ActivityRecord};
