use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Which third-party adapters have credentials.
#[derive(Serialize)]
pub struct IntegrationStatus {
    pub gemini: bool,
    pub freepik: bool,
    pub twitter: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable. Missing
    /// adapter credentials never degrade the status.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub integrations: IntegrationStatus,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match atelier_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        integrations: IntegrationStatus {
            gemini: state.gemini.is_configured(),
            freepik: state.freepik.is_configured(),
            twitter: state.twitter.is_configured(),
        },
    })
}

/// Root-level routes, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
