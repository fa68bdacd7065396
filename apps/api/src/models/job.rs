use serde::{Deserialize, Deserializer, Serialize};

/// A job posting normalized from a raw search hit. All free-text fields
/// have HTML markup stripped before storage; fields absent in the source
/// stay `None` rather than defaulting to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    /// Join key against match results. Unique within one result set.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    pub excluding_requirements: Option<String>,
    pub desirable_knowledge: Option<String>,
    pub url: Option<String>,
    pub position_level: Option<String>,
}

/// The scoring service's verdict for one listing. Scores are trusted
/// as-is (no range validation or clamping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    #[serde(deserialize_with = "string_or_number")]
    pub job_id: String,
    pub match_score: f64,
    #[serde(default)]
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A listing enriched with its match score, sorted into the final
/// response order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub listing: JobListing,
    pub match_score: f64,
    pub match_reasons: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Accepts a JSON string or number and canonicalizes it to `String`.
/// The search index and the scoring service disagree on id types, so
/// both sides of the listing/match join go through this.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
