//! Transport seam between the conversation state machine and the
//! chatbot HTTP surface. The state machine never issues HTTP calls
//! directly; it talks through `ChatTransport` so tests can drive a
//! whole conversation against fakes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::clients::chat::ChatReply;
use crate::matching::orchestrator::JobMatchResponse;
use crate::models::profile::ResumeProfile;

/// A file picked by the user for the upload-and-extract path.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub file_name: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Direct-chat path: free text to `POST /chatbot/ask`.
    async fn ask(&self, query: &str) -> Result<ChatReply>;

    /// Upload-and-extract path: the file plus any accompanying message.
    async fn extract_profile(
        &self,
        file: &UploadedFile,
        user_message: Option<&str>,
    ) -> Result<ResumeProfile>;

    /// The real job-search request, fired only after the pacing
    /// sequence has run.
    async fn search_jobs(&self, profile: &ResumeProfile) -> Result<JobMatchResponse>;
}

/// Reqwest-backed transport against the API's own chatbot endpoints.
pub struct HttpChatTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn ask(&self, query: &str) -> Result<ChatReply> {
        let reply = self
            .client
            .post(format!("{}/chatbot/ask", self.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await?
            .error_for_status()
            .context("chat request rejected")?
            .json()
            .await?;
        Ok(reply)
    }

    async fn extract_profile(
        &self,
        file: &UploadedFile,
        user_message: Option<&str>,
    ) -> Result<ResumeProfile> {
        let mut form = Form::new().part(
            "file",
            Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone()),
        );
        if let Some(message) = user_message {
            form = form.text("user_message", message.to_string());
        }

        let profile = self
            .client
            .post(format!("{}/chatbot/ask", self.base_url))
            .multipart(form)
            .send()
            .await?
            .error_for_status()
            .context("extraction request rejected")?
            .json()
            .await?;
        Ok(profile)
    }

    async fn search_jobs(&self, profile: &ResumeProfile) -> Result<JobMatchResponse> {
        let response = self
            .client
            .post(format!("{}/chatbot/search_jobs", self.base_url))
            .json(&json!({ "profile_data": profile }))
            .send()
            .await?
            .error_for_status()
            .context("job search request rejected")?
            .json()
            .await?;
        Ok(response)
    }
}
