//! Handlers for `/colors`.

use atelier_core::types::DbId;
use atelier_db::models::color::{Color, ColorFilter, CreateColor, UpdateColor};
use atelier_db::repositories::ColorRepo;
use atelier_integrations::pantone_match::{match_pantone, PantoneMatch};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/colors
///
/// `?search=` matches name, code or Pantone code (case-insensitive).
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ColorFilter>,
) -> AppResult<Json<DataResponse<Vec<Color>>>> {
    let rows = ColorRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/colors/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Color>>> {
    let row = ColorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Color", id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/colors
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateColor>,
) -> AppResult<(StatusCode, Json<DataResponse<Color>>)> {
    input.validate()?;
    let row = ColorRepo::create(&state.pool, &input).await?;
    tracing::info!(color_id = row.id, "Color created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/colors/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CreateColor>,
) -> AppResult<Json<DataResponse<Color>>> {
    input.validate()?;
    let row = ColorRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Color", id))?;
    tracing::info!(color_id = id, "Color replaced");
    Ok(Json(DataResponse { data: row }))
}

/// PATCH /api/v1/colors/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateColor>,
) -> AppResult<Json<DataResponse<Color>>> {
    input.validate()?;
    let row = ColorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Color", id))?;
    tracing::info!(color_id = id, "Color updated");
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/colors/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ColorRepo::delete(&state.pool, id).await? {
        return Err(not_found("Color", id));
    }
    tracing::info!(color_id = id, "Color deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/colors/pantone-match
///
/// Multipart upload with an `image` field (PNG, JPEG or WebP). Returns the
/// mean color and a Pantone suggestion; `source` says whether the model or
/// the local reference table produced it.
pub async fn pantone_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<PantoneMatch>>> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some(bytes);
            break;
        }
    }

    let image = image
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::BadRequest("Multipart field 'image' is required".into()))?;

    let result = match_pantone(Some(state.gemini.as_ref()), &image).await?;
    tracing::info!(code = %result.code, source = ?result.source, "Pantone match computed");
    Ok(Json(DataResponse { data: result }))
}
