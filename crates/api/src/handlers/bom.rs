//! Handlers for bill-of-materials lines.

use atelier_core::types::DbId;
use atelier_db::models::bom::{BomItem, CreateBomItem};
use atelier_db::repositories::BomRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use super::samples::ensure_sample;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/samples/{id}/bom
pub async fn list(
    State(state): State<AppState>,
    AppPath(sample_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<BomItem>>>> {
    ensure_sample(&state, sample_id).await?;
    let items = BomRepo::list_for_sample(&state.pool, sample_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/samples/{id}/bom
pub async fn create(
    State(state): State<AppState>,
    AppPath(sample_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateBomItem>,
) -> AppResult<(StatusCode, Json<DataResponse<BomItem>>)> {
    input.validate()?;
    ensure_sample(&state, sample_id).await?;
    let item = BomRepo::create(&state.pool, sample_id, &input).await?;
    tracing::info!(bom_item_id = item.id, sample_id, "BOM item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/bom-items/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateBomItem>,
) -> AppResult<Json<DataResponse<BomItem>>> {
    input.validate()?;
    let item = BomRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("BOM item", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/bom-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BomRepo::delete(&state.pool, id).await? {
        tracing::info!(bom_item_id = id, "BOM item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("BOM item", id))
    }
}
