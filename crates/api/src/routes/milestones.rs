//! Route definitions for the `/milestones` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::milestones;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
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
        .route("/", get(milestones::list).post(milestones::create))
        .route(
            "/{id}",
            get(milestones::get)
                .put(milestones::replace)
                .patch(milestones::update)
                .delete(milestones::delete),
        )
}
