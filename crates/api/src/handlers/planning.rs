//! Handlers for financial planning and open-to-buy planning.
//!
//! Both resources are written in bulk (upsert on their natural key) and
//! edited one numeric cell at a time through `PATCH /{id}/field`.

use atelier_core::planning::{
    field_value, resolve_field, FINANCIAL_UPDATABLE_FIELDS, OTB_UPDATABLE_FIELDS,
};
use atelier_core::types::DbId;
use atelier_db::models::planning::{
    FieldUpdate, FinancialPlan, FinancialPlanFilter, OtbPlan, OtbPlanFilter, UpsertFinancialPlan,
    UpsertOtbPlan,
};
use atelier_db::repositories::{FinancialPlanRepo, OtbPlanRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_rows<T: Validate>(rows: &[T]) -> AppResult<()> {
    if rows.is_empty() {
        return Err(AppError::BadRequest("At least one row is required".into()));
    }
    for row in rows {
        row.validate()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Financial planning
// ---------------------------------------------------------------------------

/// GET /api/v1/financial-planning
pub async fn list_financial(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<FinancialPlanFilter>,
) -> AppResult<Json<DataResponse<Vec<FinancialPlan>>>> {
    let plans = FinancialPlanRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// POST /api/v1/financial-planning
///
/// Upserts every row on `(year, season_code, division_name, month)`.
pub async fn upsert_financial(
    State(state): State<AppState>,
    AppJson(rows): AppJson<Vec<UpsertFinancialPlan>>,
) -> AppResult<Json<DataResponse<Vec<FinancialPlan>>>> {
    validate_rows(&rows)?;
    let plans = FinancialPlanRepo::upsert_many(&state.pool, &rows).await?;
    tracing::info!(rows = plans.len(), "Financial plan rows upserted");
    Ok(Json(DataResponse { data: plans }))
}

/// PATCH /api/v1/financial-planning/{id}/field
pub async fn update_financial_field(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<FieldUpdate>,
) -> AppResult<Json<DataResponse<FinancialPlan>>> {
    let column = resolve_field(&input.field, FINANCIAL_UPDATABLE_FIELDS)?;
    let value = field_value(column, input.value)?;
    let plan = FinancialPlanRepo::update_field(&state.pool, id, column, value)
        .await?
        .ok_or_else(|| not_found("Financial plan", id))?;
    tracing::info!(plan_id = id, field = column, "Financial plan field updated");
    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/v1/financial-planning/{id}
pub async fn delete_financial(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if FinancialPlanRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Financial plan", id))
    }
}

// ---------------------------------------------------------------------------
// Open-to-buy planning
// ---------------------------------------------------------------------------

/// GET /api/v1/otb-planning
pub async fn list_otb(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<OtbPlanFilter>,
) -> AppResult<Json<DataResponse<Vec<OtbPlan>>>> {
    let plans = OtbPlanRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// POST /api/v1/otb-planning
///
/// Upserts every row on `(style_number, week_number)`.
pub async fn upsert_otb(
    State(state): State<AppState>,
    AppJson(rows): AppJson<Vec<UpsertOtbPlan>>,
) -> AppResult<Json<DataResponse<Vec<OtbPlan>>>> {
    validate_rows(&rows)?;
    let plans = OtbPlanRepo::upsert_many(&state.pool, &rows).await?;
    tracing::info!(rows = plans.len(), "OTB plan rows upserted");
    Ok(Json(DataResponse { data: plans }))
}

/// PATCH /api/v1/otb-planning/{id}/field
pub async fn update_otb_field(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<FieldUpdate>,
) -> AppResult<Json<DataResponse<OtbPlan>>> {
    let column = resolve_field(&input.field, OTB_UPDATABLE_FIELDS)?;
    let value = field_value(column, input.value)?;
    let plan = OtbPlanRepo::update_field(&state.pool, id, column, value)
        .await?
        .ok_or_else(|| not_found("OTB plan", id))?;
    tracing::info!(plan_id = id, field = column, "OTB plan field updated");
    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/v1/otb-planning/{id}
pub async fn delete_otb(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if OtbPlanRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("OTB plan", id))
    }
}
