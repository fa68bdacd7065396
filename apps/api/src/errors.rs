use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::chat::ChatServiceError;
use crate::clients::filter::FilterError;
use crate::clients::search::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Pipeline failures carry a stage tag (search / filter / chat service)
/// for observability, but all of them surface to the UI as a flat
/// `{"error": message}` payload — the chat widget renders one string.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Job search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Job filtering failed: {0}")]
    Filter(#[from] FilterError),

    #[error("Chat service error: {0}")]
    ChatService(#[from] ChatServiceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Search(e) => {
                tracing::error!("search stage failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Filter(e) => {
                tracing::error!("filter stage failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ChatService(e) => {
                tracing::error!("chat service call failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let resp = AppError::Validation("missing query".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_search_error_maps_to_500() {
        let resp = AppError::Search(SearchError::Status(503)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_filter_error_maps_to_500() {
        let resp = AppError::Filter(FilterError::Status {
            status: 422,
            body: "bad profile".to_string(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
