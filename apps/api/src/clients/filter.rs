//! Job filter client — sends the profile, the full listing pool, and
//! the inferred region to the scoring service in one batch call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::job::{JobListing, JobMatch};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(90);

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream body is kept for diagnostics; the orchestrator
    /// surfaces it in the error detail rather than swallowing it.
    #[error("scoring service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Seam for the scoring service.
#[async_trait]
pub trait JobFilter: Send + Sync {
    async fn filter_and_score(
        &self,
        profile: &str,
        listings: &[JobListing],
        region: Option<&str>,
    ) -> Result<Vec<JobMatch>, FilterError>;
}

#[derive(Debug, Serialize)]
struct FilterRequest<'a> {
    profile: &'a str,
    jobs: &'a [JobListing],
    region: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct FilterResponse {
    /// Missing `matched_jobs` in a success body means no matches, not a
    /// malformed response.
    #[serde(default)]
    matched_jobs: Vec<JobMatch>,
}

/// HTTP implementation against the filtering/scoring microservice.
pub struct HttpJobFilterClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobFilterClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.filter_service_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl JobFilter for HttpJobFilterClient {
    async fn filter_and_score(
        &self,
        profile: &str,
        listings: &[JobListing],
        region: Option<&str>,
    ) -> Result<Vec<JobMatch>, FilterError> {
        // One batch request, no pagination: the whole pool goes in a
        // single call.
        let body = FilterRequest {
            profile,
            jobs: listings,
            region,
        };

        let response = self
            .client
            .post(format!("{}/filter_jobs", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FilterError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: FilterResponse = response.json().await?;
        debug!(
            "scoring service matched {} of {} postings",
            parsed.matched_jobs.len(),
            listings.len()
        );
        Ok(parsed.matched_jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_request_wire_shape() {
        let listings = vec![JobListing {
            id: "1".to_string(),
            title: Some("Analista".to_string()),
            description: None,
            region: None,
            department: None,
            excluding_requirements: None,
            desirable_knowledge: None,
            url: None,
            position_level: None,
        }];
        let body = FilterRequest {
            profile: "Soy analista",
            jobs: &listings,
            region: Some("Región del Maule"),
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["profile"], "Soy analista");
        assert_eq!(v["jobs"][0]["id"], "1");
        assert_eq!(v["region"], "Región del Maule");
    }

    #[test]
    fn test_missing_matched_jobs_is_empty_not_error() {
        let parsed: FilterResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matched_jobs.is_empty());
    }

    #[test]
    fn test_matched_jobs_parse() {
        let parsed: FilterResponse = serde_json::from_str(
            r#"{"matched_jobs": [{"job_id": 2, "match_score": 50,
                "match_reasons": ["región coincide"], "recommendations": []}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.matched_jobs.len(), 1);
        assert_eq!(parsed.matched_jobs[0].job_id, "2");
    }
}
