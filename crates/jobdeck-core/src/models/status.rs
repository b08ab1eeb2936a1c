//! Application pipeline stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a tracked application, ordered by pipeline progress.
///
/// Serialized by display name so snapshots stay readable and stable
/// across versions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum JobStatus {
    /// Not yet applied
    #[default]
    Wishlist,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    /// All stages in pipeline order, for board columns and iteration.
    pub const ALL: [Self; 5] = [
        Self::Wishlist,
        Self::Applied,
        Self::Interviewing,
        Self::Offer,
        Self::Rejected,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wishlist => "Wishlist",
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }

    /// Short glyph used by client column headers.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Wishlist => "\u{1f3af}",
            Self::Applied => "\u{1f4e4}",
            Self::Interviewing => "\u{1f4ac}",
            Self::Offer => "\u{1f389}",
            Self::Rejected => "\u{274c}",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
