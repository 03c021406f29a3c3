//! Supplier entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `suppliers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplier {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSupplier {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /suppliers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierFilter {
    /// Case-insensitive substring over name and code.
    pub search: Option<String>,
    pub country: Option<String>,
}
