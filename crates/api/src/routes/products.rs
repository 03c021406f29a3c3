//! Route definitions for the `/products` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /               -> list  (?search, status, season_id, category)
/// POST   /               -> create
/// GET    /{id}           -> get
/// PUT    /{id}           -> replace
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
/// GET    /{id}/samples   -> list_samples
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::get)
                .put(products::replace)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/{id}/samples", get(products::list_samples))
}
