//! Route definitions for the `/colors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::colors;
use crate::state::AppState;

/// Routes mounted at `/colors`.
///
/// ```text
/// GET    /                -> list  (?search)
/// POST   /                -> create
/// POST   /pantone-match   -> pantone_match (multipart `image`)
/// GET    /{id}            -> get
/// PUT    /{id}            -> replace
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(colors::list).post(colors::create))
        .route("/pantone-match", post(colors::pantone_match))
        .route(
            "/{id}",
            get(colors::get)
                .put(colors::replace)
                .patch(colors::update)
                .delete(colors::delete),
        )
}
