use serde::{Deserialize, Serialize};

/// A candidate profile, either typed by the user or produced by the
/// extraction service from an uploaded résumé. Immutable once built
/// within a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    /// Free-text description of skills and experience.
    pub profile: String,
    /// Region stated explicitly by the user or the extraction service.
    /// `None` means the region must be inferred from the profile text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}
