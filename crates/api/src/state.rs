use std::sync::Arc;

use atelier_integrations::freepik::FreepikClient;
use atelier_integrations::gemini::GeminiClient;
use atelier_integrations::twitter::TwitterClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: atelier_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub gemini: Arc<GeminiClient>,
    pub freepik: Arc<FreepikClient>,
    pub twitter: Arc<TwitterClient>,
}

impl AppState {
    /// Build the state, sharing one HTTP connection pool across adapters.
    ///
    /// Adapters without credentials are still constructed; they fail with a
    /// descriptive error when a request actually needs them.
    pub fn new(pool: atelier_db::DbPool, config: ServerConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            pool,
            gemini: Arc::new(GeminiClient::with_client(http.clone(), config.gemini.clone())),
            freepik: Arc::new(FreepikClient::with_client(http.clone(), config.freepik.clone())),
            twitter: Arc::new(TwitterClient::with_client(http, config.twitter.clone())),
            config: Arc::new(config),
        }
    }
}
