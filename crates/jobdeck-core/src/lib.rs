//! jobdeck-core - Core library for Jobdeck
//!
//! This crate contains the shared models, the conflict-aware sync
//! engine, and snapshot storage used by all Jobdeck interfaces
//! (desktop, mobile).

pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod storage;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use models::{Job, JobId, JobStatus};
pub use store::{ImportMode, JobStore, StoreMode};
