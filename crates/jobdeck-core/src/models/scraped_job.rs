//! Externally sourced job postings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Job, JobId};

/// A job posting fetched from the remote search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedJob {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub city: String,
    pub state: String,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub apply_link: String,
    pub description: String,
    pub posted_date: Option<DateTime<Utc>>,
    pub employment_type: Option<String>,
    pub source: JobSource,
}

impl ScrapedJob {
    /// Human-readable location assembled from city and state.
    #[must_use]
    pub fn location(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (true, true) => String::new(),
            (true, false) => self.state.clone(),
            (false, true) => self.city.clone(),
            (false, false) => format!("{}, {}", self.city, self.state),
        }
    }

    /// Formatted salary range, empty when the posting has no figures.
    #[must_use]
    pub fn salary_range(&self) -> String {
        #[allow(clippy::cast_possible_truncation)]
        fn dollars(value: f64) -> i64 {
            value as i64
        }

        match (self.min_salary, self.max_salary) {
            (Some(min), Some(max)) => format!("${} - ${}", dollars(min), dollars(max)),
            (Some(min), None) => format!("${}", dollars(min)),
            (None, Some(max)) => format!("Up to ${}", dollars(max)),
            (None, None) => String::new(),
        }
    }

    /// Convert this posting into a tracked job in the initial stage.
    #[must_use]
    pub fn into_job(self) -> Job {
        let location = self.location();
        let salary = self.salary_range();
        let mut job = Job::new(self.company, self.title);
        job.location = location;
        job.salary = salary;
        job.url = self.apply_link;
        job.notes = self.employment_type.unwrap_or_default();
        job
    }
}

/// Job board the posting was published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSource {
    LinkedIn,
    Indeed,
    Glassdoor,
    ZipRecruiter,
    Unknown,
}

impl JobSource {
    /// Classify a publisher string reported by the search API.
    #[must_use]
    pub fn from_publisher(publisher: Option<&str>) -> Self {
        let Some(publisher) = publisher else {
            return Self::Unknown;
        };
        let publisher = publisher.to_lowercase();
        if publisher.contains("linkedin") {
            Self::LinkedIn
        } else if publisher.contains("indeed") {
            Self::Indeed
        } else if publisher.contains("glassdoor") {
            Self::Glassdoor
        } else if publisher.contains("ziprecruiter") {
            Self::ZipRecruiter
        } else {
            Self::Unknown
        }
    }
}
