//! Axum route handlers for the chatbot HTTP surface.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clients::chat::ChatReply;
use crate::errors::AppError;
use crate::matching::orchestrator::JobMatchResponse;
use crate::models::profile::ResumeProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Response of `POST /chatbot/ask` — either the chat reply or the
/// extracted profile, depending on which path the request took.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AskResponse {
    Chat(ChatReply),
    Profile(ResumeProfile),
}

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    pub profile_data: ResumeProfile,
}

/// POST /chatbot/ask
///
/// Accepts either `application/json {query}` (direct chat) or
/// `multipart/form-data {file, user_message}` (upload-and-extract).
/// The two are mutually exclusive per submission; the handler branches
/// on the request Content-Type.
pub async fn handle_ask(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AskResponse>, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?;
        let upload = read_upload(multipart).await?;

        info!(file = %upload.file_name, "extracting profile from upload");
        let profile = state
            .chat
            .extract_profile(upload.bytes, upload.file_name, upload.user_message)
            .await?;
        Ok(Json(AskResponse::Profile(profile)))
    } else {
        let Json(req): Json<AskRequest> = Json::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))?;

        let reply = state.chat.chat(&req.query).await?;
        Ok(Json(AskResponse::Chat(reply)))
    }
}

/// POST /chatbot/search_jobs
///
/// Runs the full matching pipeline for the given profile. Failures
/// surface as `{"error": message}` with status 500 via `AppError`.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(req): Json<SearchJobsRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    let response = state.orchestrator.run(&req.profile_data).await?;
    Ok(Json(response))
}

struct Upload {
    bytes: Bytes,
    file_name: String,
    user_message: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(Bytes, String)> = None;
    let mut user_message: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("resume")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read file: {e}")))?;
                file = Some((bytes, file_name));
            }
            Some("user_message") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read message: {e}")))?;
                if !text.is_empty() {
                    user_message = Some(text);
                }
            }
            _ => {}
        }
    }

    let (bytes, file_name) =
        file.ok_or_else(|| AppError::Validation("multipart request is missing 'file'".to_string()))?;

    Ok(Upload {
        bytes,
        file_name,
        user_message,
    })
}
