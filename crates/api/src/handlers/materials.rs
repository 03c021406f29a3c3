//! Handlers for `/materials`.

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::material::{
    CreateMaterial, Material, MaterialDeletion, MaterialFilter, UpdateMaterial,
};
use atelier_db::repositories::MaterialRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/materials
///
/// `?search=` matches name, code or composition; `?category=` and
/// `?supplier_id=` are exact.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<MaterialFilter>,
) -> AppResult<Json<DataResponse<Vec<Material>>>> {
    let materials = MaterialRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// GET /api/v1/materials/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Material>>> {
    let material = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Material", id))?;
    Ok(Json(DataResponse { data: material }))
}

/// POST /api/v1/materials
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMaterial>,
) -> AppResult<(StatusCode, Json<DataResponse<Material>>)> {
    input.validate()?;
    let material = MaterialRepo::create(&state.pool, &input).await?;
    tracing::info!(material_id = material.id, code = %material.code, "Material created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// PUT /api/v1/materials/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateMaterial>,
) -> AppResult<Json<DataResponse<Material>>> {
    input.validate()?;
    let material = MaterialRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Material", id))?;
    tracing::info!(material_id = id, "Material replaced");
    Ok(Json(DataResponse { data: material }))
}

/// PATCH /api/v1/materials/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateMaterial>,
) -> AppResult<Json<DataResponse<Material>>> {
    input.validate()?;
    let material = MaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Material", id))?;
    tracing::info!(material_id = id, "Material updated");
    Ok(Json(DataResponse { data: material }))
}

/// DELETE /api/v1/materials/{id}
///
/// Refused with 409 while any BOM item or sample uses the material.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    match MaterialRepo::delete(&state.pool, id).await? {
        MaterialDeletion::Deleted => {
            tracing::info!(material_id = id, "Material deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        MaterialDeletion::NotFound => Err(not_found("Material", id)),
        MaterialDeletion::InUse(usage) => {
            tracing::info!(
                material_id = id,
                bom_items = usage.bom_items,
                sample_materials = usage.sample_materials,
                "Material delete refused, still referenced"
            );
            Err(AppError::Core(CoreError::Conflict(format!(
                "Material {id} is used by {} BOM item(s) and {} sample material(s)",
                usage.bom_items, usage.sample_materials
            ))))
        }
    }
}
