pub mod chatbot;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/chatbot/ask", post(chatbot::handle_ask))
        .route("/chatbot/search_jobs", post(chatbot::handle_search_jobs))
        .with_state(state)
}
