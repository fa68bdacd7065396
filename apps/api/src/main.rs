mod clients;
mod config;
mod conversation;
mod errors;
mod matching;
mod models;
mod region;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clients::chat::ChatServiceClient;
use crate::clients::filter::HttpJobFilterClient;
use crate::clients::search::HttpJobSearchClient;
use crate::config::Config;
use crate::matching::orchestrator::JobMatchOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Empleabot API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // HTTP adapters, built once from config and never reconfigured
    let chat = ChatServiceClient::new(&config);
    info!("Chat service client initialized ({})", config.chat_service_url);

    let search = Arc::new(HttpJobSearchClient::new(&config));
    info!(
        "Job search client initialized ({}, index '{}')",
        config.search_base_url, config.search_index
    );

    let filter = Arc::new(HttpJobFilterClient::new(&config));
    info!("Job filter client initialized ({})", config.filter_service_url);

    let orchestrator = JobMatchOrchestrator::new(search, filter);

    // Build app state
    let state = AppState {
        config: config.clone(),
        chat,
        orchestrator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
