//! Handlers for `/milestones` and per-sample milestone progress.

use atelier_core::status::{validate_optional_status, PROGRESS_STATUSES};
use atelier_core::types::DbId;
use atelier_db::models::milestone::{
    CreateMilestone, Milestone, MilestoneProgress, UpdateMilestone, UpsertProgress,
};
use atelier_db::repositories::MilestoneRepo;
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

/// GET /api/v1/milestones
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Milestone>>>> {
    let milestones = MilestoneRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: milestones }))
}

/// GET /api/v1/milestones/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Milestone>>> {
    let milestone = MilestoneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Milestone", id))?;
    Ok(Json(DataResponse { data: milestone }))
}

/// POST /api/v1/milestones
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMilestone>,
) -> AppResult<(StatusCode, Json<DataResponse<Milestone>>)> {
    input.validate()?;
    let milestone = MilestoneRepo::create(&state.pool, &input).await?;
    tracing::info!(milestone_id = milestone.id, name = %milestone.name, "Milestone created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: milestone })))
}

/// PUT /api/v1/milestones/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateMilestone>,
) -> AppResult<Json<DataResponse<Milestone>>> {
    input.validate()?;
    let milestone = MilestoneRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Milestone", id))?;
    Ok(Json(DataResponse { data: milestone }))
}

/// PATCH /api/v1/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMilestone>,
) -> AppResult<Json<DataResponse<Milestone>>> {
    input.validate()?;
    let milestone = MilestoneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Milestone", id))?;
    Ok(Json(DataResponse { data: milestone }))
}

/// DELETE /api/v1/milestones/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if MilestoneRepo::delete(&state.pool, id).await? {
        tracing::info!(milestone_id = id, "Milestone deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Milestone", id))
    }
}

/// GET /api/v1/samples/{id}/progress
pub async fn list_progress(
    State(state): State<AppState>,
    AppPath(sample_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<MilestoneProgress>>>> {
    ensure_sample(&state, sample_id).await?;
    let progress = MilestoneRepo::list_progress(&state.pool, sample_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// PUT /api/v1/samples/{sample_id}/progress/{milestone_id}
pub async fn upsert_progress(
    State(state): State<AppState>,
    AppPath((sample_id, milestone_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpsertProgress>,
) -> AppResult<Json<DataResponse<MilestoneProgress>>> {
    validate_optional_status("status", input.status.as_deref(), PROGRESS_STATUSES)?;
    ensure_sample(&state, sample_id).await?;
    MilestoneRepo::find_by_id(&state.pool, milestone_id)
        .await?
        .ok_or_else(|| not_found("Milestone", milestone_id))?;

    let progress =
        MilestoneRepo::upsert_progress(&state.pool, sample_id, milestone_id, &input).await?;
    tracing::info!(
        sample_id,
        milestone_id,
        status = %progress.status,
        "Milestone progress recorded"
    );
    Ok(Json(DataResponse { data: progress }))
}
