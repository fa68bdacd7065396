//! Job search client — fetches the full candidate pool of postings from
//! the external search index and normalizes each hit into a `JobListing`.
//!
//! Purely fetch-and-normalize: no filtering, scoring, or sorting happens
//! here. Markup is stripped from free-text fields so everything
//! downstream works on clean text.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::job::{string_or_number, JobListing};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
/// One query retrieves the whole pool; the index holds a few hundred
/// open postings at any time.
const MAX_POOL_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search index returned status {0}")]
    Status(u16),
}

/// Seam for the search index. The orchestrator depends on this trait so
/// tests can substitute a fake pool.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self) -> Result<Vec<JobListing>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    id: String,
    #[serde(rename = "_source")]
    source: RawJobPosting,
}

/// Raw posting document as stored in the index. Absent fields stay
/// `None`; they are never defaulted to empty strings.
#[derive(Debug, Deserialize)]
struct RawJobPosting {
    title: Option<String>,
    description: Option<String>,
    region: Option<String>,
    department: Option<String>,
    excluding_requirements: Option<String>,
    desirable_knowledge: Option<String>,
    url: Option<String>,
    position_level: Option<String>,
}

impl SearchHit {
    fn into_listing(self) -> JobListing {
        JobListing {
            id: self.id,
            title: self.source.title,
            description: self.source.description.as_deref().map(strip_html),
            region: self.source.region,
            department: self.source.department,
            excluding_requirements: self
                .source
                .excluding_requirements
                .as_deref()
                .map(strip_html),
            desirable_knowledge: self.source.desirable_knowledge.as_deref().map(strip_html),
            url: self.source.url,
            position_level: self.source.position_level,
        }
    }
}

/// HTTP implementation against the environment-selected index base.
pub struct HttpJobSearchClient {
    client: reqwest::Client,
    base_url: String,
    index: String,
}

impl HttpJobSearchClient {
    pub fn new(config: &Config) -> Self {
        if !config.verify_tls {
            warn!("TLS certificate verification disabled for the search index (development only)");
        }
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .danger_accept_invalid_certs(!config.verify_tls)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.search_base_url.trim_end_matches('/').to_string(),
            index: config.search_index.clone(),
        }
    }
}

#[async_trait]
impl JobSearch for HttpJobSearchClient {
    async fn search(&self) -> Result<Vec<JobListing>, SearchError> {
        let url = format!("{}/api/v3/{}/_search", self.base_url, self.index);
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "query": { "match_all": {} },
                "size": MAX_POOL_SIZE,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let envelope: SearchEnvelope = response.json().await?;
        let listings: Vec<JobListing> = envelope
            .hits
            .hits
            .into_iter()
            .map(SearchHit::into_listing)
            .collect();

        debug!("search index returned {} postings", listings.len());
        Ok(listings)
    }
}

/// Strips `<...>` HTML tags, leaving the text content.
pub fn strip_html(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
    tag.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_tags() {
        assert_eq!(strip_html("<p>Hello</p>"), "Hello");
        assert_eq!(
            strip_html("<ul><li>Excel avanzado</li><li>SQL</li></ul>"),
            "Excel avanzadoSQL"
        );
    }

    #[test]
    fn test_strip_html_leaves_plain_text_alone() {
        assert_eq!(strip_html("Sin formato"), "Sin formato");
    }

    #[test]
    fn test_strip_html_handles_attributes() {
        assert_eq!(
            strip_html(r#"<a href="https://example.cl">postular</a>"#),
            "postular"
        );
    }

    #[test]
    fn test_hit_normalization_strips_markup_and_keeps_absent_fields_null() {
        let hit: SearchHit = serde_json::from_value(json!({
            "_id": 118243,
            "_source": {
                "title": "Analista de Datos",
                "description": "<p>Equipo de BI</p>",
                "excluding_requirements": "<b>Título profesional</b>",
                "region": "Región del Biobío"
            }
        }))
        .unwrap();

        let listing = hit.into_listing();
        assert_eq!(listing.id, "118243");
        assert_eq!(listing.description.as_deref(), Some("Equipo de BI"));
        assert_eq!(
            listing.excluding_requirements.as_deref(),
            Some("Título profesional")
        );
        assert!(listing.desirable_knowledge.is_none());
        assert!(listing.url.is_none());
    }

    #[test]
    fn test_envelope_tolerates_missing_hits_array() {
        let envelope: SearchEnvelope = serde_json::from_value(json!({ "hits": {} })).unwrap();
        assert!(envelope.hits.hits.is_empty());
    }
}
