//! Season entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `seasons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Season {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSeason {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1900, max = 2200, message = "year is out of range"))]
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSeason {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 1900, max = 2200, message = "year is out of range"))]
    pub year: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
