//! Route definitions for the `/collections` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::collections;
use crate::state::AppState;

/// Routes mounted at `/collections`.
///
/// ```text
/// GET    /        -> list (?season_id)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::list).post(collections::create))
        .route(
            "/{id}",
            get(collections::get)
                .put(collections::replace)
                .patch(collections::update)
                .delete(collections::delete),
        )
}
