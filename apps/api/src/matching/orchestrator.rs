//! Job match orchestrator — one request/response cycle from profile to
//! ranked job list, short-circuiting on the first stage failure.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clients::filter::JobFilter;
use crate::clients::search::JobSearch;
use crate::errors::AppError;
use crate::matching::merge::merge;
use crate::models::job::RankedJob;
use crate::models::profile::ResumeProfile;
use crate::region::infer_region;

/// Final pipeline output, serialized verbatim to the UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobMatchResponse {
    pub jobs: Vec<RankedJob>,
    pub total_jobs: usize,
}

/// Coordinates the search, region-inference, filter, and merge stages.
///
/// Holds the search index and scoring service behind trait objects so
/// tests inject fakes without touching the pipeline. The pipeline is
/// stateless and request-scoped; nothing here is shared mutable state.
#[derive(Clone)]
pub struct JobMatchOrchestrator {
    search: Arc<dyn JobSearch>,
    filter: Arc<dyn JobFilter>,
}

impl JobMatchOrchestrator {
    pub fn new(search: Arc<dyn JobSearch>, filter: Arc<dyn JobFilter>) -> Self {
        Self { search, filter }
    }

    /// Runs the pipeline. Each stage failure aborts immediately — no
    /// partial results are ever returned alongside an error, and the
    /// filter stage never runs after a failed search.
    pub async fn run(&self, profile: &ResumeProfile) -> Result<JobMatchResponse, AppError> {
        let listings = self.search.search().await?;

        let region = infer_region(&profile.profile, profile.region.as_deref());
        info!(
            pool = listings.len(),
            region = region.as_deref().unwrap_or("desconocida"),
            "scoring job pool against profile"
        );

        let matches = self
            .filter
            .filter_and_score(&profile.profile, &listings, region.as_deref())
            .await?;

        let jobs = merge(&listings, matches);
        info!(matched = jobs.len(), "pipeline complete");

        Ok(JobMatchResponse {
            total_jobs: jobs.len(),
            jobs,
        })
    }
}
