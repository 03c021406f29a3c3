//! Handlers for care-label derivation and quality inspections.

use atelier_core::care::{
    derive_care_notes, derive_care_symbols, derive_inspection_items, CareSymbol, GarmentSpec,
    InspectionItemDraft,
};
use atelier_core::classify::{
    classify_color_depth, detect_fibers, CareMethod, ColorDepth, FiberType, GarmentCategory,
    Processing,
};
use atelier_core::error::CoreError;
use atelier_core::status::{validate_optional_status, INSPECTION_RESULTS};
use atelier_core::types::DbId;
use atelier_db::models::inspection::{
    CreateInspection, CreateInspectionItem, InspectionDetail, InspectionFilter, InspectionItem,
    NewCareLabel, NewInspectionItem, QualityInspection, UpdateInspection, UpdateInspectionItem,
};
use atelier_db::repositories::{InspectionRepo, SampleRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use super::not_found;
use super::samples::ensure_sample;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything derived from one garment description.
#[derive(Debug, Serialize)]
pub struct DerivedCare {
    pub care_symbols: Vec<CareSymbol>,
    pub care_notes: Vec<String>,
    pub inspection_items: Vec<InspectionItemDraft>,
}

impl DerivedCare {
    fn from_spec(spec: &GarmentSpec) -> Self {
        Self {
            care_symbols: derive_care_symbols(spec),
            care_notes: derive_care_notes(spec),
            inspection_items: derive_inspection_items(spec),
        }
    }
}

fn parse_fibers(values: &[String]) -> Result<Vec<FiberType>, CoreError> {
    values.iter().map(|v| FiberType::parse(v)).collect()
}

fn parse_processings(values: &[String]) -> Result<Vec<Processing>, CoreError> {
    values.iter().map(|v| Processing::parse(v)).collect()
}

/// POST /api/v1/quality/derive
///
/// Preview only; nothing is stored.
pub async fn derive(AppJson(spec): AppJson<GarmentSpec>) -> Json<DataResponse<DerivedCare>> {
    Json(DataResponse {
        data: DerivedCare::from_spec(&spec),
    })
}

/// GET /api/v1/quality-inspections
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<InspectionFilter>,
) -> AppResult<Json<DataResponse<Vec<QualityInspection>>>> {
    let inspections = InspectionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: inspections }))
}

/// GET /api/v1/quality-inspections/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<InspectionDetail>>> {
    let detail = InspectionRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Inspection", id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/quality-inspections
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInspection>,
) -> AppResult<(StatusCode, Json<DataResponse<QualityInspection>>)> {
    input.validate()?;
    GarmentCategory::parse(&input.category)?;
    if let Some(depth) = input.color_depth.as_deref() {
        ColorDepth::parse(depth)?;
    }
    if let Some(method) = input.care_method.as_deref() {
        CareMethod::parse(method)?;
    }
    parse_fibers(&input.fibers)?;
    parse_processings(&input.processings)?;
    ensure_sample(&state, input.sample_id).await?;

    let inspection = InspectionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        inspection_id = inspection.id,
        sample_id = inspection.sample_id,
        "Inspection created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: inspection })))
}

/// PATCH /api/v1/quality-inspections/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateInspection>,
) -> AppResult<Json<DataResponse<QualityInspection>>> {
    input.validate()?;
    if let Some(category) = input.category.as_deref() {
        GarmentCategory::parse(category)?;
    }
    if let Some(depth) = input.color_depth.as_deref() {
        ColorDepth::parse(depth)?;
    }
    if let Some(method) = input.care_method.as_deref() {
        CareMethod::parse(method)?;
    }
    if let Some(fibers) = input.fibers.as_deref() {
        parse_fibers(fibers)?;
    }
    if let Some(processings) = input.processings.as_deref() {
        parse_processings(processings)?;
    }
    validate_optional_status("result", input.result.as_deref(), INSPECTION_RESULTS)?;

    let inspection = InspectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Inspection", id))?;
    tracing::info!(inspection_id = id, result = %inspection.result, "Inspection updated");
    Ok(Json(DataResponse { data: inspection }))
}

/// DELETE /api/v1/quality-inspections/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if InspectionRepo::delete(&state.pool, id).await? {
        tracing::info!(inspection_id = id, "Inspection deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Inspection", id))
    }
}

/// POST /api/v1/quality-inspections/{id}/generate
///
/// Builds a garment description from the inspection and its sample, then
/// replaces the derived checklist items and all care labels. Fibers stored
/// on the inspection win over fibers detected from the sample's materials;
/// likewise for color depth and the sample's colors. Detected values are
/// not stored, so later edits to the sample show up on the next run.
pub async fn generate(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<InspectionDetail>>> {
    let inspection = InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Inspection", id))?;
    let sample = SampleRepo::find_detail(&state.pool, inspection.sample_id)
        .await?
        .ok_or_else(|| not_found("Sample", inspection.sample_id))?;

    let fibers = if inspection.fibers.is_empty() {
        let names: Vec<&str> = sample
            .materials
            .iter()
            .flat_map(|m| std::iter::once(m.material_name.as_str()).chain(m.composition.as_deref()))
            .collect();
        detect_fibers(&names)
    } else {
        parse_fibers(&inspection.fibers)?
    };

    let color = match inspection.color_depth.as_deref() {
        Some(depth) => ColorDepth::parse(depth)?,
        None => {
            let colors = serde_json::to_value(&sample.colors)
                .map_err(|e| AppError::InternalError(format!("Failed to encode colors: {e}")))?;
            classify_color_depth(&colors)
        }
    };

    let spec = GarmentSpec {
        category: GarmentCategory::parse(&inspection.category)?,
        fibers,
        processings: parse_processings(&inspection.processings)?,
        color,
        care_method: CareMethod::parse(&inspection.care_method)?,
    };
    let derived = DerivedCare::from_spec(&spec);

    let items: Vec<NewInspectionItem> = derived
        .inspection_items
        .iter()
        .map(|d| NewInspectionItem {
            category: d.category.to_string(),
            item_name: d.item_name.to_string(),
            standard: Some(d.standard.to_string()),
            is_ai_generated: d.is_ai_generated,
        })
        .collect();
    let labels: Vec<NewCareLabel> = derived
        .care_symbols
        .iter()
        .map(|s| NewCareLabel {
            category: s.category.to_string(),
            symbol_code: s.symbol_code.to_string(),
            symbol_name: s.symbol_name.to_string(),
            description: Some(s.description.to_string()),
        })
        .collect();
    InspectionRepo::replace_derived(&state.pool, id, &items, &labels).await?;
    tracing::info!(
        inspection_id = id,
        color_depth = spec.color.as_str(),
        items = items.len(),
        labels = labels.len(),
        "Inspection checklist generated"
    );

    let detail = InspectionRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Inspection", id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/quality-inspections/{id}/items
pub async fn add_item(
    State(state): State<AppState>,
    AppPath(inspection_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateInspectionItem>,
) -> AppResult<(StatusCode, Json<DataResponse<InspectionItem>>)> {
    input.validate()?;
    InspectionRepo::find_by_id(&state.pool, inspection_id)
        .await?
        .ok_or_else(|| not_found("Inspection", inspection_id))?;
    let item = InspectionRepo::add_item(&state.pool, inspection_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PATCH /api/v1/quality-inspection-items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateInspectionItem>,
) -> AppResult<Json<DataResponse<InspectionItem>>> {
    input.validate()?;
    validate_optional_status("result", input.result.as_deref(), INSPECTION_RESULTS)?;
    let item = InspectionRepo::update_item(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Inspection item", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/quality-inspection-items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if InspectionRepo::delete_item(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Inspection item", id))
    }
}
