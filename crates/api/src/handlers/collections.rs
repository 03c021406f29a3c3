//! Handlers for `/collections`.

use atelier_core::types::DbId;
use atelier_db::models::collection::{Collection, CollectionFilter, CreateCollection, UpdateCollection};
use atelier_db::repositories::CollectionRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/collections
///
/// Optional `?season_id=` filter.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CollectionFilter>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let rows = CollectionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/collections/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Collection>>> {
    let row = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Collection", id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/collections
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCollection>,
) -> AppResult<(StatusCode, Json<DataResponse<Collection>>)> {
    input.validate()?;
    let row = CollectionRepo::create(&state.pool, &input).await?;
    tracing::info!(collection_id = row.id, "Collection created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/collections/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateCollection>,
) -> AppResult<Json<DataResponse<Collection>>> {
    input.validate()?;
    let row = CollectionRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Collection", id))?;
    tracing::info!(collection_id = id, "Collection replaced");
    Ok(Json(DataResponse { data: row }))
}

/// PATCH /api/v1/collections/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCollection>,
) -> AppResult<Json<DataResponse<Collection>>> {
    input.validate()?;
    let row = CollectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Collection", id))?;
    tracing::info!(collection_id = id, "Collection updated");
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/collections/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !CollectionRepo::delete(&state.pool, id).await? {
        return Err(not_found("Collection", id));
    }
    tracing::info!(collection_id = id, "Collection deleted");
    Ok(StatusCode::NO_CONTENT)
}
