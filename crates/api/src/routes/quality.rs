//! Route definitions for care derivation and quality inspections.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::quality;
use crate::state::AppState;

/// Routes mounted at `/quality`.
///
/// ```text
/// POST   /derive   -> derive
/// ```
pub fn derive_router() -> Router<AppState> {
    Router::new().route("/derive", post(quality::derive))
}

/// Routes mounted at `/quality-inspections`.
///
/// ```text
/// GET    /                -> list  (?sample_id)
/// POST   /                -> create
/// GET    /{id}            -> get (with items and care labels)
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/generate   -> generate
/// POST   /{id}/items      -> add_item
/// ```
pub fn inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", get(quality::list).post(quality::create))
        .route(
            "/{id}",
            get(quality::get)
                .patch(quality::update)
                .delete(quality::delete),
        )
        .route("/{id}/generate", post(quality::generate))
        .route("/{id}/items", post(quality::add_item))
}

/// Routes mounted at `/quality-inspection-items`.
///
/// ```text
/// PATCH  /{id}   -> update_item
/// DELETE /{id}   -> delete_item
/// ```
pub fn item_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(quality::update_item).delete(quality::delete_item),
    )
}
