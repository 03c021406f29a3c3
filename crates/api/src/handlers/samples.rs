//! Handlers for `/samples`.

use atelier_core::status::{validate_optional_status, SAMPLE_STATUSES};
use atelier_core::types::DbId;
use atelier_db::models::sample::{CreateSample, Sample, SampleDetail, SampleFilter, UpdateSample};
use atelier_db::repositories::{ProductRepo, SampleRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/samples
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<SampleFilter>,
) -> AppResult<Json<DataResponse<Vec<Sample>>>> {
    let samples = SampleRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: samples }))
}

/// GET /api/v1/samples/{id}
///
/// Includes the sample's colors, sizes and materials.
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<SampleDetail>>> {
    let detail = SampleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Sample", id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/samples
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSample>,
) -> AppResult<(StatusCode, Json<DataResponse<SampleDetail>>)> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), SAMPLE_STATUSES)?;
    ensure_product(&state, input.product_id).await?;

    let detail = SampleRepo::create(&state.pool, &input).await?;
    tracing::info!(
        sample_id = detail.sample.id,
        sample_number = %detail.sample.sample_number,
        product_id = detail.sample.product_id,
        "Sample created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/samples/{id}
///
/// Nested colors, sizes and materials are replaced wholesale.
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSample>,
) -> AppResult<Json<DataResponse<SampleDetail>>> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), SAMPLE_STATUSES)?;
    ensure_product(&state, input.product_id).await?;

    let detail = SampleRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Sample", id))?;
    tracing::info!(sample_id = id, "Sample replaced");
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/samples/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSample>,
) -> AppResult<Json<DataResponse<Sample>>> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), SAMPLE_STATUSES)?;

    let sample = SampleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Sample", id))?;
    tracing::info!(sample_id = id, status = %sample.status, "Sample updated");
    Ok(Json(DataResponse { data: sample }))
}

/// DELETE /api/v1/samples/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if SampleRepo::delete(&state.pool, id).await? {
        tracing::info!(sample_id = id, "Sample deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Sample", id))
    }
}

/// 404 unless the sample exists. Used by the nested sample routes.
pub(crate) async fn ensure_sample(state: &AppState, id: DbId) -> AppResult<()> {
    SampleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Sample", id))?;
    Ok(())
}

async fn ensure_product(state: &AppState, id: DbId) -> AppResult<()> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    Ok(())
}
