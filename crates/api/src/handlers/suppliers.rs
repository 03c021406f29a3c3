//! Handlers for `/suppliers`.

use atelier_core::types::DbId;
use atelier_db::models::supplier::{CreateSupplier, Supplier, SupplierFilter, UpdateSupplier};
use atelier_db::repositories::SupplierRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/suppliers
///
/// `?search=` matches name or code (case-insensitive); `?country=` is a case-insensitive exact match.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<SupplierFilter>,
) -> AppResult<Json<DataResponse<Vec<Supplier>>>> {
    let rows = SupplierRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/suppliers/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Supplier>>> {
    let row = SupplierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Supplier", id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/suppliers
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSupplier>,
) -> AppResult<(StatusCode, Json<DataResponse<Supplier>>)> {
    input.validate()?;
    let row = SupplierRepo::create(&state.pool, &input).await?;
    tracing::info!(supplier_id = row.id, "Supplier created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/suppliers/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateSupplier>,
) -> AppResult<Json<DataResponse<Supplier>>> {
    input.validate()?;
    let row = SupplierRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Supplier", id))?;
    tracing::info!(supplier_id = id, "Supplier replaced");
    Ok(Json(DataResponse { data: row }))
}

/// PATCH /api/v1/suppliers/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSupplier>,
) -> AppResult<Json<DataResponse<Supplier>>> {
    input.validate()?;
    let row = SupplierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Supplier", id))?;
    tracing::info!(supplier_id = id, "Supplier updated");
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/suppliers/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !SupplierRepo::delete(&state.pool, id).await? {
        return Err(not_found("Supplier", id));
    }
    tracing::info!(supplier_id = id, "Supplier deleted");
    Ok(StatusCode::NO_CONTENT)
}
