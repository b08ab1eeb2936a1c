//! Synced-folder change watcher
//!
//! Watches the directory holding the synced snapshot and delivers
//! freshly decoded snapshots over a channel after a debounce window, so
//! a burst of writes from the cloud drive collapses into one
//! notification. Everything here is best effort: an unreachable folder
//! or unreadable file means no notification, never an error surfaced to
//! the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::Job;
use crate::storage::SnapshotStorage;

/// Window for collapsing rapid successive writes into one delivery.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Handle to a running watch on the synced snapshot file.
///
/// Must be created inside a tokio runtime. Dropping the handle stops
/// the watch; [`stop`](Self::stop) is idempotent.
pub struct SnapshotWatcher {
    watcher: Option<RecommendedWatcher>,
    task: Option<JoinHandle<()>>,
}

impl SnapshotWatcher {
    /// Begin watching `snapshot_path` and deliver decoded snapshots on
    /// `sender`.
    ///
    /// If the watch cannot be established (folder missing, permission
    /// denied) the returned handle is inert: it simply never delivers.
    #[must_use]
    pub fn spawn(
        snapshot_path: PathBuf,
        debounce: Duration,
        sender: mpsc::UnboundedSender<Vec<Job>>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<()>();

        let file_name = snapshot_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let Ok(event) = result else { return };
            let ours = event
                .paths
                .iter()
                .any(|path| path.file_name().map(std::ffi::OsStr::to_os_string) == file_name);
            if ours {
                // Receiver gone means the watcher was stopped.
                let _ = event_tx.send(());
            }
        });

        let mut watcher = match watcher {
            Ok(watcher) => watcher,
            Err(error) => {
                tracing::debug!(%error, "snapshot watcher unavailable");
                return Self::inert();
            }
        };

        let watch_dir = snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        if let Err(error) = watcher.watch(&watch_dir, RecursiveMode::NonRecursive) {
            tracing::debug!(dir = %watch_dir.display(), %error, "synced folder not watchable");
            return Self::inert();
        }

        let task = tokio::spawn(deliver_debounced(snapshot_path, debounce, event_rx, sender));
        Self {
            watcher: Some(watcher),
            task: Some(task),
        }
    }

    const fn inert() -> Self {
        Self {
            watcher: None,
            task: None,
        }
    }

    /// Stop observing. Safe to call repeatedly; no callback fires after
    /// this returns.
    pub fn stop(&mut self) {
        self.watcher = None;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SnapshotWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Collapse event bursts, then re-read and deliver the snapshot.
async fn deliver_debounced(
    snapshot_path: PathBuf,
    debounce: Duration,
    mut events: mpsc::UnboundedReceiver<()>,
    sender: mpsc::UnboundedSender<Vec<Job>>,
) {
    while events.recv().await.is_some() {
        // Swallow further events until the window stays quiet.
        loop {
            match tokio::time::timeout(debounce, events.recv()).await {
                Ok(Some(())) => {}
                Ok(None) => return,
                Err(_elapsed) => break,
            }
        }

        let path = snapshot_path.clone();
        let snapshot = tokio::task::spawn_blocking(move || SnapshotStorage::load_from(&path))
            .await
            .ok()
            .flatten();

        // Unreadable or half-synced file: skip, a later event will retry.
        if let Some(jobs) = snapshot {
            if sender.send(jobs).is_err() {
                return;
            }
        }
    }
}
