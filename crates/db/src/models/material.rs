//! Material entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub category: Option<String>,
    pub composition: Option<String>,
    pub weight_gsm: Option<f64>,
    pub width_cm: Option<f64>,
    pub unit_price: Option<f64>,
    pub currency: String,
    pub supplier_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterial {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    pub category: Option<String>,
    pub composition: Option<String>,
    #[validate(range(min = 0.0, message = "weight_gsm must not be negative"))]
    pub weight_gsm: Option<f64>,
    #[validate(range(min = 0.0, message = "width_cm must not be negative"))]
    pub width_cm: Option<f64>,
    #[validate(range(min = 0.0, message = "unit_price must not be negative"))]
    pub unit_price: Option<f64>,
    /// Defaults to `USD`.
    pub currency: Option<String>,
    pub supplier_id: Option<DbId>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaterial {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    pub category: Option<String>,
    pub composition: Option<String>,
    #[validate(range(min = 0.0, message = "weight_gsm must not be negative"))]
    pub weight_gsm: Option<f64>,
    #[validate(range(min = 0.0, message = "width_cm must not be negative"))]
    pub width_cm: Option<f64>,
    #[validate(range(min = 0.0, message = "unit_price must not be negative"))]
    pub unit_price: Option<f64>,
    pub currency: Option<String>,
    pub supplier_id: Option<DbId>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /materials`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialFilter {
    /// Case-insensitive substring over name, code and composition.
    pub search: Option<String>,
    pub category: Option<String>,
    pub supplier_id: Option<DbId>,
}

/// How many rows still point at a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct MaterialUsage {
    pub bom_items: i64,
    pub sample_materials: i64,
}

impl MaterialUsage {
    pub fn is_referenced(&self) -> bool {
        self.bom_items > 0 || self.sample_materials > 0
    }
}

/// Result of a guarded material delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialDeletion {
    Deleted,
    NotFound,
    InUse(MaterialUsage),
}
