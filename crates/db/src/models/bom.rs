//! Bill-of-materials line items.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `bom_items` joined with the material name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BomItem {
    pub id: DbId,
    pub sample_id: DbId,
    pub material_id: DbId,
    pub material_name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
    pub placement: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or replacing a BOM line. The sample comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBomItem {
    pub material_id: DbId,
    #[validate(range(min = 0.0, message = "quantity must not be negative"))]
    pub quantity: f64,
    pub unit: Option<String>,
    #[validate(range(min = 0.0, message = "unit_cost must not be negative"))]
    pub unit_cost: Option<f64>,
    pub placement: Option<String>,
}
