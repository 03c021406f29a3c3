pub mod admin;
pub mod auth;
pub mod collections;
pub mod colors;
pub mod designs;
pub mod health;
pub mod materials;
pub mod milestones;
pub mod planning;
pub mod products;
pub mod quality;
pub mod reviews;
pub mod samples;
pub mod seasons;
pub mod sizes;
pub mod suppliers;
pub mod trends;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                    login (public)
/// /auth/me                                       current user (requires auth)
/// /admin/users                                   list, create (admin only)
///
/// /seasons, /collections, /suppliers,
/// /materials, /colors, /products                 CRUD (+PATCH), filters as query params
/// /colors/pantone-match                          match an uploaded image (multipart)
/// /products/{id}/samples                         samples of a product
///
/// /size-groups                                   CRUD; /{id}/sizes list, create
/// /size-masters/{id}                             replace, delete
///
/// /samples                                       CRUD with nested colors, sizes, materials
/// /samples/{id}/bom                              list, create
/// /samples/{id}/costs                            list, create
/// /samples/{id}/progress                         list; /{milestone_id} upsert
/// /bom-items/{id}                                replace, delete
/// /costs/{id}                                    get, replace, update, delete
/// /milestones                                    CRUD
///
/// /financial-planning                            list, bulk upsert; /{id}/field; /{id}
/// /otb-planning                                  list, bulk upsert; /{id}/field; /{id}
///
/// /quality/derive                                preview care symbols, notes, items
/// /quality-inspections                           CRUD; /{id}/generate; /{id}/items
/// /quality-inspection-items/{id}                 update, delete
///
/// /reviews                                       list, upsert; /{id} get, delete
/// /reviews/analytics/*                           ratings, top/bottom products, tags, keywords
/// /reviews/analyze                               run one summarisation pass
///
/// /designs/generate                              AI design generation
/// /trends/search                                 recent social posts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        // Master data.
        .nest("/seasons", seasons::router())
        .nest("/collections", collections::router())
        .nest("/suppliers", suppliers::router())
        .nest("/materials", materials::router())
        .nest("/colors", colors::router())
        .nest("/size-groups", sizes::group_router())
        .nest("/size-masters", sizes::size_router())
        // Product development.
        .nest("/products", products::router())
        .nest("/samples", samples::router())
        .nest("/bom-items", samples::bom_item_router())
        .nest("/costs", samples::cost_router())
        .nest("/milestones", milestones::router())
        // Planning.
        .nest("/financial-planning", planning::financial_router())
        .nest("/otb-planning", planning::otb_router())
        // Quality.
        .nest("/quality", quality::derive_router())
        .nest("/quality-inspections", quality::inspection_router())
        .nest("/quality-inspection-items", quality::item_router())
        // Reviews and external services.
        .nest("/reviews", reviews::router())
        .nest("/designs", designs::router())
        .nest("/trends", trends::router())
}
