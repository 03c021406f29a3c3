//! Route definitions for size groups and their sizes.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sizes;
use crate::state::AppState;

/// Routes mounted at `/size-groups`.
///
/// ```text
/// GET    /              -> list_groups
/// POST   /              -> create_group
/// GET    /{id}          -> get_group
/// PUT    /{id}          -> replace_group
/// PATCH  /{id}          -> update_group
/// DELETE /{id}          -> delete_group
/// GET    /{id}/sizes    -> list_sizes
/// POST   /{id}/sizes    -> create_size
/// ```
pub fn group_router() -> Router<AppState> {
    Router::new()
        .route("/", get(sizes::list_groups).post(sizes::create_group))
        .route(
            "/{id}",
            get(sizes::get_group)
                .put(sizes::replace_group)
                .patch(sizes::update_group)
                .delete(sizes::delete_group),
        )
        .route(
            "/{id}/sizes",
            get(sizes::list_sizes).post(sizes::create_size),
        )
}

/// Routes mounted at `/size-masters`.
///
/// ```text
/// PUT    /{id}   -> replace_size
/// DELETE /{id}   -> delete_size
/// ```
pub fn size_router() -> Router<AppState> {
    Router::new().route("/{id}", put(sizes::replace_size).delete(sizes::delete_size))
}
