//! Multi-device snapshot synchronization: reconciliation and watching.

mod merge;
mod watcher;

pub use merge::{apply_resolution, reconcile, MergeOutcome};
pub use watcher::{SnapshotWatcher, DEFAULT_DEBOUNCE};
