//! Handlers for sample costings. Every response carries computed totals.

use atelier_core::types::DbId;
use atelier_db::models::cost::{CostWithTotals, CreateCost, UpdateCost};
use atelier_db::repositories::CostRepo;
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

/// GET /api/v1/samples/{id}/costs
pub async fn list(
    State(state): State<AppState>,
    AppPath(sample_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<CostWithTotals>>>> {
    ensure_sample(&state, sample_id).await?;
    let costs = CostRepo::list_for_sample(&state.pool, sample_id)
        .await?
        .into_iter()
        .map(CostWithTotals::from)
        .collect();
    Ok(Json(DataResponse { data: costs }))
}

/// POST /api/v1/samples/{id}/costs
pub async fn create(
    State(state): State<AppState>,
    AppPath(sample_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateCost>,
) -> AppResult<(StatusCode, Json<DataResponse<CostWithTotals>>)> {
    input.validate()?;
    ensure_sample(&state, sample_id).await?;
    let cost = CostRepo::create(&state.pool, sample_id, &input).await?;
    tracing::info!(cost_id = cost.id, sample_id, "Cost created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CostWithTotals::from(cost),
        }),
    ))
}

/// GET /api/v1/costs/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CostWithTotals>>> {
    let cost = CostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Cost", id))?;
    Ok(Json(DataResponse {
        data: CostWithTotals::from(cost),
    }))
}

/// PUT /api/v1/costs/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateCost>,
) -> AppResult<Json<DataResponse<CostWithTotals>>> {
    input.validate()?;
    let cost = CostRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Cost", id))?;
    Ok(Json(DataResponse {
        data: CostWithTotals::from(cost),
    }))
}

/// PATCH /api/v1/costs/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCost>,
) -> AppResult<Json<DataResponse<CostWithTotals>>> {
    input.validate()?;
    let cost = CostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Cost", id))?;
    Ok(Json(DataResponse {
        data: CostWithTotals::from(cost),
    }))
}

/// DELETE /api/v1/costs/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if CostRepo::delete(&state.pool, id).await? {
        tracing::info!(cost_id = id, "Cost deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Cost", id))
    }
}
