//! Route definitions for the `/materials` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET    /        -> list (?search, category, supplier_id)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> replace
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list).post(materials::create))
        .route(
            "/{id}",
            get(materials::get)
                .put(materials::replace)
                .patch(materials::update)
                .delete(materials::delete),
        )
}
