use crate::clients::chat::ChatServiceClient;
use crate::config::Config;
use crate::matching::orchestrator::JobMatchOrchestrator;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is request-independent: clients are
/// built once at startup from `Config` and never reconfigured.
#[derive(Clone)]
pub struct AppState {
    /// Kept for handlers that need deployment details; clients are
    /// already configured from it at startup.
    #[allow(dead_code)]
    pub config: Config,
    pub chat: ChatServiceClient,
    pub orchestrator: JobMatchOrchestrator,
}
