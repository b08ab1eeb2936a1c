//! Snapshot reconciliation
//!
//! Pure three-way merge of two full snapshots of the collection, keyed
//! by job identity and decided by modification timestamp. Produces the
//! merged snapshot plus the conflicts that need user input; callers own
//! applying resolutions and persisting.

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::models::{ConflictResolution, Job, JobId, SyncConflict};

/// Result of reconciling a local snapshot against a remote one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The reconciled collection
    pub merged: Vec<Job>,
    /// Same-identity pairs the merge could not decide
    pub conflicts: Vec<SyncConflict>,
}

impl MergeOutcome {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Reconcile two snapshots of the collection.
///
/// Classification per local job: absent remotely keeps local (absence
/// is not deletion; a stale or partial remote read must never drop
/// data); identical on both sides is a no-op; otherwise the strictly newer
/// `modified_at` wins. Equal timestamps with differing content are a
/// genuine conflict: the local version stays in as a placeholder and the
/// pair is reported. Remote-only jobs are appended after all
/// local-derived entries, in their remote order, so the result is
/// reproducible.
#[must_use]
pub fn reconcile(local: &[Job], remote: &[Job]) -> MergeOutcome {
    let remote_by_id: HashMap<JobId, &Job> = remote.iter().map(|job| (job.id, job)).collect();

    let mut merged = Vec::with_capacity(local.len());
    let mut conflicts = Vec::new();

    for local_job in local {
        match remote_by_id.get(&local_job.id) {
            None => merged.push(local_job.clone()),
            Some(remote_job) if *remote_job == local_job => merged.push(local_job.clone()),
            Some(remote_job) if local_job.modified_at > remote_job.modified_at => {
                merged.push(local_job.clone());
            }
            Some(remote_job) if remote_job.modified_at > local_job.modified_at => {
                merged.push((*remote_job).clone());
            }
            Some(remote_job) => {
                // Same timestamp, different content: placeholder local,
                // let the user decide.
                conflicts.push(SyncConflict::new(local_job.clone(), (*remote_job).clone()));
                merged.push(local_job.clone());
            }
        }
    }

    let seen: HashSet<JobId> = local.iter().map(|job| job.id).collect();
    for remote_job in remote {
        if !seen.contains(&remote_job.id) {
            merged.push(remote_job.clone());
        }
    }

    MergeOutcome { merged, conflicts }
}

/// Apply a user-chosen resolution to the live collection.
///
/// Mutates `jobs` in place by identity lookup. Resolving against a
/// collection that no longer holds the conflicted identity is a no-op;
/// the caller still drops the conflict from its pending set.
pub fn apply_resolution(
    conflict: &SyncConflict,
    resolution: ConflictResolution,
    jobs: &mut Vec<Job>,
) {
    match resolution {
        ConflictResolution::KeepLocal => {}
        ConflictResolution::KeepRemote => {
            if let Some(slot) = jobs.iter_mut().find(|job| job.id == conflict.local.id) {
                *slot = conflict.remote.clone();
            }
        }
        ConflictResolution::KeepBoth => {
            let mut duplicate = conflict.remote.clone();
            duplicate.id = JobId::new();
            duplicate.company = format!("{} (Copy)", duplicate.company);
            duplicate.modified_at = Utc::now();
            jobs.push(duplicate);
        }
    }
}
