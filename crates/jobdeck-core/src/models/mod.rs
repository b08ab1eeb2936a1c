//! Data models shared by all Jobdeck interfaces

mod job;
mod scraped_job;
mod search_criteria;
mod status;
mod sync_conflict;

pub use job::{Job, JobId};
pub use scraped_job::{JobSource, ScrapedJob};
pub use search_criteria::{DatePostedFilter, SearchCriteria};
pub use status::JobStatus;
pub use sync_conflict::{ConflictId, ConflictResolution, SyncConflict};
