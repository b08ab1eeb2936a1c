//! Remote job search client over the JSearch API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{DatePostedFilter, JobId, JobSource, ScrapedJob, SearchCriteria};

const BASE_URL: &str = "https://jsearch.p.rapidapi.com/search";
const API_HOST: &str = "jsearch.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors surfaced verbatim to the user when a search fails.
#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("API key not configured. Add your RapidAPI key in Settings.")]
    MissingApiKey,
    #[error("Invalid API key. Check your RapidAPI key in Settings.")]
    InvalidApiKey,
    #[error("API rate limit exceeded. The free tier allows 500 requests/month.")]
    RateLimited,
    #[error("Server error (status code: {0})")]
    Server(u16),
    #[error("Search request timed out")]
    Timeout,
    #[error("Received an invalid response from the server: {0}")]
    MalformedResponse(String),
    #[error("Network error: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for JobSearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

pub type JobSearchResult<T> = Result<T, JobSearchError>;

/// Authenticated client for the JSearch job-posting API.
#[derive(Clone)]
pub struct JobSearchClient {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for JobSearchClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("JobSearchClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl JobSearchClient {
    /// Build a client with the given RapidAPI key, if any.
    ///
    /// Requests are bounded by a 30 second timeout; a slow upstream
    /// yields [`JobSearchError::Timeout`] rather than hanging.
    pub fn new(api_key: Option<String>) -> JobSearchResult<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { api_key, client })
    }

    /// Search for postings matching `criteria`, one page at a time.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: u32,
    ) -> JobSearchResult<Vec<ScrapedJob>> {
        let api_key = self.api_key.as_deref().ok_or(JobSearchError::MissingApiKey)?;

        let mut query = vec![
            ("query".to_string(), criteria.query.clone()),
            ("page".to_string(), page.to_string()),
            ("num_pages".to_string(), "1".to_string()),
        ];
        if !criteria.location.is_empty() {
            query.push(("location".to_string(), criteria.location.clone()));
        }
        if criteria.remote_only {
            query.push(("remote_jobs_only".to_string(), "true".to_string()));
        }
        if criteria.date_posted != DatePostedFilter::All {
            query.push((
                "date_posted".to_string(),
                criteria.date_posted.api_value().to_string(),
            ));
        }

        let response = self
            .client
            .get(BASE_URL)
            .query(&query)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", API_HOST)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {}
            401 | 403 => return Err(JobSearchError::InvalidApiKey),
            429 => return Err(JobSearchError::RateLimited),
            status => return Err(JobSearchError::Server(status)),
        }

        let payload = response.text().await?;
        parse_search_response(&payload)
    }
}

/// Parse a JSearch response payload into postings.
///
/// Public for testability — callers can exercise parsing without
/// network access.
pub fn parse_search_response(payload: &str) -> JobSearchResult<Vec<ScrapedJob>> {
    let response: JSearchResponse = serde_json::from_str(payload)
        .map_err(|error| JobSearchError::MalformedResponse(error.to_string()))?;

    Ok(response.data.into_iter().map(ScrapedJob::from).collect())
}

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[allow(dead_code)]
    status: String,
    data: Vec<JSearchJob>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_apply_link: Option<String>,
    job_description: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_employment_type: Option<String>,
    job_publisher: Option<String>,
}

impl From<JSearchJob> for ScrapedJob {
    fn from(job: JSearchJob) -> Self {
        Self {
            id: JobId::new(),
            title: job.job_title.unwrap_or_else(|| "Unknown Title".to_string()),
            company: job
                .employer_name
                .unwrap_or_else(|| "Unknown Company".to_string()),
            city: job.job_city.unwrap_or_default(),
            state: job.job_state.unwrap_or_default(),
            min_salary: job.job_min_salary,
            max_salary: job.job_max_salary,
            apply_link: job.job_apply_link.unwrap_or_default(),
            description: job.job_description.unwrap_or_default(),
            posted_date: job
                .job_posted_at_datetime_utc
                .as_deref()
                .and_then(parse_posted_date),
            employment_type: job.job_employment_type,
            source: JobSource::from_publisher(job.job_publisher.as_deref()),
        }
    }
}

fn parse_posted_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_key_fails_before_any_request() {
        let client = JobSearchClient::new(None).unwrap();
        let criteria = SearchCriteria {
            query: "rust engineer".to_string(),
            ..SearchCriteria::default()
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime.block_on(client.search(&criteria, 1));
        assert!(matches!(result, Err(JobSearchError::MissingApiKey)));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = JobSearchClient::new(Some("   ".to_string())).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = JobSearchClient::new(Some("secret-key".to_string())).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_response_maps_postings() {
        let payload = r#"
        {
          "status": "OK",
          "request_id": "abc",
          "data": [
            {
              "job_title": "Backend Engineer",
              "employer_name": "Initech",
              "job_city": "Austin",
              "job_state": "TX",
              "job_min_salary": 120000,
              "job_max_salary": 150000,
              "job_apply_link": "https://example.com/apply",
              "job_description": "Build things",
              "job_posted_at_datetime_utc": "2024-03-01T12:00:00.000Z",
              "job_employment_type": "FULLTIME",
              "job_publisher": "LinkedIn"
            }
          ]
        }
        "#;

        let postings = parse_search_response(payload).unwrap();
        assert_eq!(postings.len(), 1);
        let posting = &postings[0];
        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.location(), "Austin, TX");
        assert_eq!(posting.source, JobSource::LinkedIn);
        assert!(posting.posted_date.is_some());
    }

    #[test]
    fn test_parse_response_defaults_absent_fields() {
        let payload = r#"{ "status": "OK", "data": [ {} ] }"#;

        let postings = parse_search_response(payload).unwrap();
        assert_eq!(postings[0].title, "Unknown Title");
        assert_eq!(postings[0].company, "Unknown Company");
        assert_eq!(postings[0].source, JobSource::Unknown);
    }

    #[test]
    fn test_parse_response_rejects_malformed_payload() {
        let error = parse_search_response("{not json").unwrap_err();
        assert!(matches!(error, JobSearchError::MalformedResponse(_)));
    }

    #[test]
    fn test_parsed_posting_converts_to_wishlist_job() {
        let payload = r#"
        {
          "status": "OK",
          "data": [
            { "job_title": "Backend Engineer", "employer_name": "Initech" }
          ]
        }
        "#;

        let postings = parse_search_response(payload).unwrap();
        let job = postings.into_iter().next().unwrap().into_job();
        assert_eq!(job.company, "Initech");
        assert_eq!(job.role, "Backend Engineer");
        assert_eq!(job.status, crate::models::JobStatus::Wishlist);
    }
}
