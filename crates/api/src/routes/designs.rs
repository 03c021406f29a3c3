//! Route definitions for the `/designs` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

/// Routes mounted at `/designs`.
///
/// ```text
/// POST   /generate   -> generate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(designs::generate))
}
