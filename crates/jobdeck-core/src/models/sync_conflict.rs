//! Sync conflict model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Job;

/// A unique identifier for a pending conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictId(Uuid);

impl ConflictId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConflictId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unresolved pairing of same-identity jobs from two replicas.
///
/// Produced by reconciliation when both sides changed a job and the
/// timestamps give no winner. Held in the store's pending set until the
/// user picks a resolution; never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConflict {
    /// Identifier of this pending conflict, unrelated to the job's ID
    pub id: ConflictId,
    /// This replica's version
    pub local: Job,
    /// The other replica's version
    pub remote: Job,
}

impl SyncConflict {
    #[must_use]
    pub fn new(local: Job, remote: Job) -> Self {
        Self {
            id: ConflictId::new(),
            local,
            remote,
        }
    }
}

/// User-chosen outcome for one conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Keep this replica's version (already in place)
    KeepLocal,
    /// Replace with the other replica's version verbatim
    KeepRemote,
    /// Keep both: the remote version is duplicated under a fresh identity
    KeepBoth,
}
