//! Handlers for `/products`.
//!
//! Product names are sanitized before every write so that division words
//! (`Mens`, `Ladies`, ...) never end up in the stored name.

use atelier_core::naming::sanitize_product_name;
use atelier_core::status::{validate_optional_status, PRODUCT_STATUSES};
use atelier_core::types::DbId;
use atelier_db::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use atelier_db::models::sample::{Sample, SampleFilter};
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

/// GET /api/v1/products
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ProductFilter>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), PRODUCT_STATUSES)?;
    input.name = sanitize_product_name(&input.name);

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(
        product_id = product.id,
        style_number = %product.style_number,
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
pub async fn replace(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<CreateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), PRODUCT_STATUSES)?;
    input.name = sanitize_product_name(&input.name);

    let product = ProductRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    tracing::info!(product_id = id, "Product replaced");
    Ok(Json(DataResponse { data: product }))
}

/// PATCH /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    input.validate()?;
    validate_optional_status("status", input.status.as_deref(), PRODUCT_STATUSES)?;
    if let Some(name) = input.name.as_deref() {
        input.name = Some(sanitize_product_name(name));
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Product", id))
    }
}

/// GET /api/v1/products/{id}/samples
pub async fn list_samples(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Sample>>>> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    let filter = SampleFilter {
        product_id: Some(id),
        ..Default::default()
    };
    let samples = SampleRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: samples }))
}
