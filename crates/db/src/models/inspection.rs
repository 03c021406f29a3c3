//! Quality inspections, their checklist items and derived care labels.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `quality_inspections` table.
///
/// `category`, `color_depth`, `care_method`, `fibers` and `processings`
/// hold the identifiers of the garment vocabularies in `atelier_core::classify`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QualityInspection {
    pub id: DbId,
    pub sample_id: DbId,
    pub category: String,
    pub color_depth: Option<String>,
    pub care_method: String,
    pub fibers: Vec<String>,
    pub processings: Vec<String>,
    pub inspector: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub result: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInspection {
    pub sample_id: DbId,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    /// Detected from the sample's colors on generation when absent.
    pub color_depth: Option<String>,
    /// Defaults to `machine_wash`.
    pub care_method: Option<String>,
    /// Detected from the sample's materials on generation when empty.
    #[serde(default)]
    pub fibers: Vec<String>,
    #[serde(default)]
    pub processings: Vec<String>,
    pub inspector: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInspection {
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    pub color_depth: Option<String>,
    pub care_method: Option<String>,
    pub fibers: Option<Vec<String>>,
    pub processings: Option<Vec<String>>,
    pub inspector: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub result: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InspectionFilter {
    pub sample_id: Option<DbId>,
}

/// A row from the `quality_inspection_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InspectionItem {
    pub id: DbId,
    pub inspection_id: DbId,
    pub category: String,
    pub item_name: String,
    pub standard: Option<String>,
    pub result: String,
    pub is_ai_generated: bool,
    /// Written by rule derivation; replaced on every regeneration.
    pub is_derived: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for adding a checklist item by hand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInspectionItem {
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "item_name is required"))]
    pub item_name: String,
    pub standard: Option<String>,
    /// Set when the item was suggested by an AI assistant client-side.
    pub is_ai_generated: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInspectionItem {
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "item_name must not be empty"))]
    pub item_name: Option<String>,
    pub standard: Option<String>,
    pub result: Option<String>,
    pub sort_order: Option<i32>,
}

/// A row from the `care_labels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CareLabel {
    pub id: DbId,
    pub inspection_id: DbId,
    pub category: String,
    pub symbol_code: String,
    pub symbol_name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A derived item ready to insert.
#[derive(Debug, Clone)]
pub struct NewInspectionItem {
    pub category: String,
    pub item_name: String,
    pub standard: Option<String>,
    pub is_ai_generated: bool,
}

/// A derived care label ready to insert.
#[derive(Debug, Clone)]
pub struct NewCareLabel {
    pub category: String,
    pub symbol_code: String,
    pub symbol_name: String,
    pub description: Option<String>,
}

/// An inspection with its items and care labels.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionDetail {
    #[serde(flatten)]
    pub inspection: QualityInspection,
    pub items: Vec<InspectionItem>,
    pub care_labels: Vec<CareLabel>,
}
