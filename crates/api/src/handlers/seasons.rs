//! Handlers for `/seasons`.

use atelier_core::types::DbId;
use atelier_db::models::season::{CreateSeason, Season, UpdateSeason};
use atelier_db::repositories::SeasonRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/seasons
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Season>>>> {
    let seasons = SeasonRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: seasons }))
}

/// GET /api/v1/seasons/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Season>>> {
    let season = SeasonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Season", id))?;
    Ok(Json(DataResponse { data: season }))
}

/// POST /api/v1/seasons
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSeason>,
) -> AppResult<(StatusCode, Json<DataResponse<Season>>)> {
    input.validate()?;
    let season = SeasonRepo::create(&state.pool, &input).await?;
    tracing::info!(season_id = season.id, code = %season.code, "Season created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: season })))
}

/// PUT /api/v1/seasons/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSeason>,
) -> AppResult<Json<DataResponse<Season>>> {
    input.validate()?;
    let season = SeasonRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Season", id))?;
    tracing::info!(season_id = id, "Season replaced");
    Ok(Json(DataResponse { data: season }))
}

/// PATCH /api/v1/seasons/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSeason>,
) -> AppResult<Json<DataResponse<Season>>> {
    input.validate()?;
    let season = SeasonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Season", id))?;
    tracing::info!(season_id = id, "Season updated");
    Ok(Json(DataResponse { data: season }))
}

/// DELETE /api/v1/seasons/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !SeasonRepo::delete(&state.pool, id).await? {
        return Err(not_found("Season", id));
    }
    tracing::info!(season_id = id, "Season deleted");
    Ok(StatusCode::NO_CONTENT)
}
