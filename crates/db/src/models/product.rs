//! Product entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table. `name` is stored sanitized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub style_number: String,
    pub name: String,
    pub category: Option<String>,
    pub division: Option<String>,
    pub status: String,
    pub season_id: Option<DbId>,
    pub collection_id: Option<DbId>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "style_number is required"))]
    pub style_number: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub category: Option<String>,
    pub division: Option<String>,
    /// Defaults to `DRAFT`.
    pub status: Option<String>,
    pub season_id: Option<DbId>,
    pub collection_id: Option<DbId>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "style_number must not be empty"))]
    pub style_number: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub division: Option<String>,
    pub status: Option<String>,
    pub season_id: Option<DbId>,
    pub collection_id: Option<DbId>,
    pub description: Option<String>,
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring over name and style number.
    pub search: Option<String>,
    pub status: Option<String>,
    pub season_id: Option<DbId>,
    pub category: Option<String>,
}
