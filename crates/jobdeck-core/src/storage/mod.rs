//! Snapshot storage
//!
//! The collection persists as one JSON file holding the full ordered
//! snapshot; there are no partial writes. A synced folder (a cloud
//! drive mount) takes precedence over the purely local directory when
//! configured. Reads are best effort: a missing or corrupt file is "no
//! data yet", never an error the caller has to handle.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::models::Job;

/// File name shared by every replica; the watcher keys on it too.
pub const SNAPSHOT_FILE_NAME: &str = "JobTracker.json";

/// Read/write boundary for the snapshot file.
///
/// Owns no state beyond its configured locations; the store façade owns
/// the live collection.
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    local_dir: PathBuf,
    synced_dir: Option<PathBuf>,
}

impl SnapshotStorage {
    /// Storage over a local directory plus an optional synced folder.
    #[must_use]
    pub fn new(local_dir: impl Into<PathBuf>, synced_dir: Option<PathBuf>) -> Self {
        Self {
            local_dir: local_dir.into(),
            synced_dir,
        }
    }

    /// Storage with no synced location configured.
    #[must_use]
    pub fn local_only(local_dir: impl Into<PathBuf>) -> Self {
        Self::new(local_dir, None)
    }

    /// Whether a synced location is configured and reachable.
    ///
    /// Creates the synced directory on first use, mirroring how cloud
    /// drive containers appear lazily.
    #[must_use]
    pub fn sync_available(&self) -> bool {
        self.synced_snapshot_path().is_some()
    }

    /// Path of the snapshot inside the synced folder, if reachable.
    #[must_use]
    pub fn synced_snapshot_path(&self) -> Option<PathBuf> {
        let dir = self.synced_dir.as_ref()?;
        if !dir.exists() && fs::create_dir_all(dir).is_err() {
            return None;
        }
        Some(dir.join(SNAPSHOT_FILE_NAME))
    }

    /// Path the adapter currently reads and writes: synced when
    /// available, local otherwise.
    #[must_use]
    pub fn active_path(&self) -> PathBuf {
        self.synced_snapshot_path()
            .unwrap_or_else(|| self.local_dir.join(SNAPSHOT_FILE_NAME))
    }

    /// Load the current snapshot, or `None` when there is no data yet.
    #[must_use]
    pub fn load(&self) -> Option<Vec<Job>> {
        Self::load_from(&self.active_path())
    }

    /// Load a snapshot from an arbitrary file, for one-off imports.
    ///
    /// Same best-effort contract as [`load`](Self::load): unreadable or
    /// undecodable input is `None`.
    #[must_use]
    pub fn load_from(path: &Path) -> Option<Vec<Job>> {
        let data = fs::read(path).ok()?;
        match serde_json::from_slice(&data) {
            Ok(jobs) => Some(jobs),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring undecodable snapshot");
                None
            }
        }
    }

    /// Persist the full snapshot to the active location.
    ///
    /// Best-effort durability: a failed write is logged and swallowed so
    /// the in-memory collection keeps working.
    pub fn save(&self, jobs: &[Job]) {
        let path = self.active_path();
        if let Err(error) = Self::write_snapshot(&path, jobs) {
            tracing::warn!(path = %path.display(), %error, "failed to persist snapshot");
        }
    }

    /// Write the snapshot to a user-chosen file, for exports.
    ///
    /// Unlike [`save`](Self::save), failures surface to the caller.
    pub fn save_to(path: &Path, jobs: &[Job]) -> Result<()> {
        Self::write_snapshot(path, jobs)
    }

    /// Atomic write: temp file in the target directory, then rename.
    /// An observer never sees a half-written snapshot.
    fn write_snapshot(path: &Path, jobs: &[Job]) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let data = serde_json::to_vec_pretty(jobs)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .map_err(|persist_error| persist_error.error)?;
        Ok(())
    }
}
