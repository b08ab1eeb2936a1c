//! Shared store service wrapper used across clients.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{ConflictId, ConflictResolution, Job, JobId, JobStatus, SyncConflict};
use crate::storage::SnapshotStorage;
use crate::store::{ImportMode, JobStore, StoreMode};
use crate::sync::SnapshotWatcher;

/// Thread-safe, clone-able handle to the single [`JobStore`] owner.
///
/// All access goes through one mutex, so a watcher delivery and a user
/// mutation can never interleave against the collection: whichever
/// takes the lock second sees the other's already-persisted state.
#[derive(Clone)]
pub struct JobStoreService {
    store: Arc<Mutex<JobStore>>,
}

impl JobStoreService {
    /// Open the service over the given storage locations.
    #[must_use]
    pub fn open(storage: SnapshotStorage) -> Self {
        Self {
            store: Arc::new(Mutex::new(JobStore::open(storage))),
        }
    }

    /// Start watching the synced snapshot for external writes.
    ///
    /// Returns `None` when no synced location is available. The
    /// returned watcher stops on drop; the listener task ends with it.
    /// A save triggered by our own persist may echo back through the
    /// watcher, which reconciles as an identical snapshot and changes
    /// nothing.
    pub async fn start_sync(&self, debounce: Duration) -> Option<SnapshotWatcher> {
        let snapshot_path = {
            let store = self.store.lock().await;
            store.storage().synced_snapshot_path()?
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = SnapshotWatcher::spawn(snapshot_path, debounce, tx);
        self.spawn_remote_listener(rx);
        Some(watcher)
    }

    /// Apply watcher deliveries under the store lock, one at a time.
    pub fn spawn_remote_listener(
        &self,
        mut receiver: mpsc::UnboundedReceiver<Vec<Job>>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            while let Some(remote) = receiver.recv().await {
                let mut store = store.lock().await;
                let mode = store.apply_remote_snapshot(&remote);
                if mode == StoreMode::ConflictPending {
                    tracing::info!(
                        pending = store.pending_conflicts().len(),
                        "remote snapshot produced conflicts awaiting resolution"
                    );
                }
            }
        })
    }

    pub async fn mode(&self) -> StoreMode {
        self.store.lock().await.mode()
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.store.lock().await.jobs().to_vec()
    }

    pub async fn jobs_for(&self, status: JobStatus) -> Vec<Job> {
        self.store
            .lock()
            .await
            .jobs_for(status)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn pending_conflicts(&self) -> Vec<SyncConflict> {
        self.store.lock().await.pending_conflicts().to_vec()
    }

    pub async fn add(&self, job: Job) {
        self.store.lock().await.add(job);
    }

    pub async fn update(&self, job: Job) -> Result<()> {
        self.store.lock().await.update(job)
    }

    pub async fn delete(&self, id: JobId) {
        self.store.lock().await.delete(id);
    }

    pub async fn move_to_status(&self, id: JobId, status: JobStatus) -> Result<()> {
        self.store.lock().await.move_to_status(id, status)
    }

    pub async fn resolve(&self, conflict_id: ConflictId, resolution: ConflictResolution) {
        self.store.lock().await.resolve(conflict_id, resolution);
    }

    pub async fn import_from(&self, path: &Path, mode: ImportMode) -> usize {
        self.store.lock().await.import_from(path, mode)
    }

    pub async fn export_to(&self, path: &Path) -> Result<()> {
        self.store.lock().await.export_to(path)
    }
}
