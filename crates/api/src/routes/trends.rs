//! Route definitions for the `/trends` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trends;
use crate::state::AppState;

/// Routes mounted at `/trends`.
///
/// ```text
/// GET    /search   -> search  (?query, max_results)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(trends::search))
}
