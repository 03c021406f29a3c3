//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /                              -> list  (?product_code, min_rating, max_rating, search, limit, offset)
/// POST   /                              -> upsert (by external_id)
/// POST   /analyze                       -> analyze
/// GET    /analytics/ratings             -> ratings
/// GET    /analytics/top-products        -> top_products
/// GET    /analytics/bottom-products     -> bottom_products
/// GET    /analytics/tags                -> tags
/// GET    /analytics/keywords            -> keywords
/// GET    /{id}                          -> get
/// DELETE /{id}                          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list).post(reviews::upsert))
        .route("/analyze", post(reviews::analyze))
        .route("/analytics/ratings", get(reviews::ratings))
        .route("/analytics/top-products", get(reviews::top_products))
        .route("/analytics/bottom-products", get(reviews::bottom_products))
        .route("/analytics/tags", get(reviews::tags))
        .route("/analytics/keywords", get(reviews::keywords))
        .route("/{id}", get(reviews::get).delete(reviews::delete))
}
