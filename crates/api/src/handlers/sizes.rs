//! Handlers for `/size-groups` and `/size-masters`.

use atelier_core::types::DbId;
use atelier_db::models::size::{
    CreateSizeGroup, CreateSizeMaster, SizeGroup, SizeMaster, UpdateSizeGroup,
};
use atelier_db::repositories::SizeRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/size-groups
pub async fn list_groups(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SizeGroup>>>> {
    let groups = SizeRepo::list_groups(&state.pool).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/size-groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<SizeGroup>>> {
    let group = SizeRepo::find_group(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Size group", id))?;
    Ok(Json(DataResponse { data: group }))
}

/// POST /api/v1/size-groups
pub async fn create_group(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSizeGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<SizeGroup>>)> {
    input.validate()?;
    let group = SizeRepo::create_group(&state.pool, &input).await?;
    tracing::info!(size_group_id = group.id, name = %group.name, "Size group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// PUT /api/v1/size-groups/{id}
pub async fn replace_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSizeGroup>,
) -> AppResult<Json<DataResponse<SizeGroup>>> {
    input.validate()?;
    let group = SizeRepo::replace_group(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Size group", id))?;
    Ok(Json(DataResponse { data: group }))
}

/// PATCH /api/v1/size-groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSizeGroup>,
) -> AppResult<Json<DataResponse<SizeGroup>>> {
    input.validate()?;
    let group = SizeRepo::update_group(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Size group", id))?;
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/size-groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if SizeRepo::delete_group(&state.pool, id).await? {
        tracing::info!(size_group_id = id, "Size group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Size group", id))
    }
}

/// GET /api/v1/size-groups/{id}/sizes
pub async fn list_sizes(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<SizeMaster>>>> {
    SizeRepo::find_group(&state.pool, group_id)
        .await?
        .ok_or_else(|| not_found("Size group", group_id))?;
    let sizes = SizeRepo::list_sizes(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: sizes }))
}

/// POST /api/v1/size-groups/{id}/sizes
pub async fn create_size(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSizeMaster>,
) -> AppResult<(StatusCode, Json<DataResponse<SizeMaster>>)> {
    input.validate()?;
    SizeRepo::find_group(&state.pool, group_id)
        .await?
        .ok_or_else(|| not_found("Size group", group_id))?;
    let size = SizeRepo::create_size(&state.pool, group_id, &input).await?;
    tracing::info!(size_master_id = size.id, size_group_id = group_id, "Size created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: size })))
}

/// PUT /api/v1/size-masters/{id}
pub async fn replace_size(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSizeMaster>,
) -> AppResult<Json<DataResponse<SizeMaster>>> {
    input.validate()?;
    let size = SizeRepo::replace_size(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Size", id))?;
    Ok(Json(DataResponse { data: size }))
}

/// DELETE /api/v1/size-masters/{id}
pub async fn delete_size(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if SizeRepo::delete_size(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Size", id))
    }
}
