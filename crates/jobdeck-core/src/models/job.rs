//! Job model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::JobStatus;

/// A unique identifier for a job, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Create a new unique job ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One tracked application in the collection
///
/// Snapshot field names are stable across versions; timestamps serialize
/// as RFC 3339. Decoding is forward-compatible: legacy records without
/// `lastModified` fall back to `dateAdded`, and absent free-text fields
/// default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JobWire")]
pub struct Job {
    /// Unique identifier, immutable after creation
    pub id: JobId,
    pub company: String,
    pub role: String,
    pub location: String,
    /// Free-text compensation, e.g. "$120k - $150k"
    pub salary: String,
    pub status: JobStatus,
    pub url: String,
    pub notes: String,
    /// Creation timestamp, set once
    #[serde(rename = "dateAdded")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; drives sync merge decisions
    #[serde(rename = "lastModified")]
    pub modified_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job with the given company and role
    #[must_use]
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            company: company.into(),
            role: role.into(),
            location: String::new(),
            salary: String::new(),
            status: JobStatus::default(),
            url: String::new(),
            notes: String::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Refresh the modification timestamp to now
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// Decode-side shadow of [`Job`] providing defaults for absent fields.
#[derive(Deserialize)]
struct JobWire {
    id: JobId,
    #[serde(default)]
    company: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    status: JobStatus,
    #[serde(default)]
    url: String,
    #[serde(default)]
    notes: String,
    #[serde(rename = "dateAdded")]
    created_at: DateTime<Utc>,
    #[serde(rename = "lastModified", default)]
    modified_at: Option<DateTime<Utc>>,
}

impl From<JobWire> for Job {
    fn from(wire: JobWire) -> Self {
        Self {
            id: wire.id,
            company: wire.company,
            role: wire.role,
            location: wire.location,
            salary: wire.salary,
            status: wire.status,
            url: wire.url,
            notes: wire.notes,
            created_at: wire.created_at,
            modified_at: wire.modified_at.unwrap_or(wire.created_at),
        }
    }
}
