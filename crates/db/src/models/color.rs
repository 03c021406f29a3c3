//! Color entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `colors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Color {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub pantone_code: Option<String>,
    pub hex: Option<String>,
    pub color_family: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateColor {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    pub pantone_code: Option<String>,
    pub hex: Option<String>,
    pub color_family: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateColor {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    pub pantone_code: Option<String>,
    pub hex: Option<String>,
    pub color_family: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorFilter {
    /// Case-insensitive substring over name, code and Pantone code.
    pub search: Option<String>,
}
