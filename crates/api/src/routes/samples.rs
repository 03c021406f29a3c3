//! Route definitions for samples and their nested BOM, costs and progress.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{bom, costs, milestones, samples};
use crate::state::AppState;

/// Routes mounted at `/samples`.
///
/// ```text
/// GET    /                                 -> samples::list  (?product_id, status, season_id)
/// POST   /                                 -> samples::create
/// GET    /{id}                             -> samples::get
/// PUT    /{id}                             -> samples::replace
/// PATCH  /{id}                             -> samples::update
/// DELETE /{id}                             -> samples::delete
/// GET    /{id}/bom                         -> bom::list
/// POST   /{id}/bom                         -> bom::create
/// GET    /{id}/costs                       -> costs::list
/// POST   /{id}/costs                       -> costs::create
/// GET    /{id}/progress                    -> milestones::list_progress
/// PUT    /{id}/progress/{milestone_id}     -> milestones::upsert_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(samples::list).post(samples::create))
        .route(
            "/{id}",
            get(samples::get)
                .put(samples::replace)
                .patch(samples::update)
                .delete(samples::delete),
        )
        .route("/{id}/bom", get(bom::list).post(bom::create))
        .route("/{id}/costs", get(costs::list).post(costs::create))
        .route("/{id}/progress", get(milestones::list_progress))
        .route(
            "/{id}/progress/{milestone_id}",
            put(milestones::upsert_progress),
        )
}

/// Routes mounted at `/bom-items`.
///
/// ```text
/// PUT    /{id}   -> bom::replace
/// DELETE /{id}   -> bom::delete
/// ```
pub fn bom_item_router() -> Router<AppState> {
    Router::new().route("/{id}", put(bom::replace).delete(bom::delete))
}

/// Routes mounted at `/costs`.
///
/// ```text
/// GET    /{id}   -> costs::get
/// PUT    /{id}   -> costs::replace
/// PATCH  /{id}   -> costs::update
/// DELETE /{id}   -> costs::delete
/// ```
pub fn cost_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(costs::get)
            .put(costs::replace)
            .patch(costs::update)
            .delete(costs::delete),
    )
}
