//! Chat service client — the single point of entry for the chat and
//! résumé-extraction microservice.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::profile::ResumeProfile;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ChatServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatRequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    content: &'a str,
}

/// Typed reply from `POST /chat/`. Passed through to the UI unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub responses: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Client for the chat/extraction microservice.
#[derive(Clone)]
pub struct ChatServiceClient {
    client: Client,
    base_url: String,
}

impl ChatServiceClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.chat_service_url.trim_end_matches('/').to_string(),
        }
    }

    /// Forwards a free-text query to `POST /chat/` and returns the typed
    /// reply.
    pub async fn chat(&self, query: &str) -> Result<ChatReply, ChatServiceError> {
        let body = ChatRequest {
            messages: vec![ChatRequestMessage { content: query }],
        };

        let response = self
            .client
            .post(format!("{}/chat/", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Sends an uploaded résumé (plus the message typed alongside it, if
    /// any) to `POST /extract_profile/` as multipart form data.
    ///
    /// Single attempt per user request — extraction is user-triggered
    /// and is retried only if the user resends. Failures never fabricate
    /// a profile.
    pub async fn extract_profile(
        &self,
        file_bytes: Bytes,
        file_name: String,
        user_message: Option<String>,
    ) -> Result<ResumeProfile, ChatServiceError> {
        debug!("extracting profile from '{file_name}' ({} bytes)", file_bytes.len());

        let mut form = Form::new().part(
            "file",
            Part::bytes(file_bytes.to_vec()).file_name(file_name),
        );
        if let Some(message) = user_message {
            form = form.text("user_message", message);
        }

        let response = self
            .client
            .post(format!("{}/extract_profile/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_shape() {
        let body = ChatRequest {
            messages: vec![ChatRequestMessage {
                content: "hola",
            }],
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["messages"][0]["content"], "hola");
    }

    #[test]
    fn test_chat_reply_parses_upstream_shape() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"responses": [{"content": "Hola, ¿en qué te ayudo?", "role": "assistant"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.responses.len(), 1);
        assert_eq!(reply.responses[0].role.as_deref(), Some("assistant"));
    }

    #[test]
    fn test_extracted_profile_parses_without_region() {
        let profile: ResumeProfile =
            serde_json::from_str(r#"{"profile": "Ingeniera de datos, 3 años"}"#).unwrap();
        assert_eq!(profile.profile, "Ingeniera de datos, 3 años");
        assert!(profile.region.is_none());
    }
}
