//! Size groups and the sizes (size masters) they contain.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `size_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SizeGroup {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSizeGroup {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSizeGroup {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A row from the `size_masters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SizeMaster {
    pub id: DbId,
    pub size_group_id: DbId,
    pub label: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSizeMaster {
    #[validate(length(min = 1, message = "label is required"))]
    pub label: String,
    pub sort_order: Option<i32>,
}
