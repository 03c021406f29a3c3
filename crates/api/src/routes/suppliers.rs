//! Route definitions for the `/suppliers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::suppliers;
use crate::state::AppState;

/// Routes mounted at `/suppliers`.
///
/// ```text
/// GET    /        -> list (?search, country)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(suppliers::list).post(suppliers::create))
        .route(
            "/{id}",
            get(suppliers::get)
                .put(suppliers::replace)
                .patch(suppliers::update)
                .delete(suppliers::delete),
        )
}
