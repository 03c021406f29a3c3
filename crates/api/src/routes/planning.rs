//! Route definitions for financial and open-to-buy planning.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::planning;
use crate::state::AppState;

/// Routes mounted at `/financial-planning`.
///
/// ```text
/// GET    /             -> list_financial  (?year, season_code, division_name)
/// POST   /             -> upsert_financial (JSON array)
/// PATCH  /{id}/field   -> update_financial_field
/// DELETE /{id}         -> delete_financial
/// ```
pub fn financial_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(planning::list_financial).post(planning::upsert_financial),
        )
        .route("/{id}", delete(planning::delete_financial))
        .route("/{id}/field", patch(planning::update_financial_field))
}

/// Routes mounted at `/otb-planning`.
///
/// ```text
/// GET    /             -> list_otb  (?style_number)
/// POST   /             -> upsert_otb (JSON array)
/// PATCH  /{id}/field   -> update_otb_field
/// DELETE /{id}         -> delete_otb
/// ```
pub fn otb_router() -> Router<AppState> {
    Router::new()
        .route("/", get(planning::list_otb).post(planning::upsert_otb))
        .route("/{id}", delete(planning::delete_otb))
        .route("/{id}/field", patch(planning::update_otb_field))
}
