//! Route definitions for the `/seasons` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::seasons;
use crate::state::AppState;

/// Routes mounted at `/seasons`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(seasons::list).post(seasons::create))
        .route(
            "/{id}",
            get(seasons::get)
                .put(seasons::replace)
                .patch(seasons::update)
                .delete(seasons::delete),
        )
}
