//! Sample entity model, its nested color/size/material rows, and DTOs.
//!
//! A sample is always written together with its nested rows. The create DTO
//! doubles as the full-update body for `PUT /samples/{id}`.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `samples` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sample {
    pub id: DbId,
    pub product_id: DbId,
    pub season_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    pub sample_number: String,
    pub sample_type: Option<String>,
    pub status: String,
    pub requested_at: Option<NaiveDate>,
    pub received_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `sample_colors` row joined with its color.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SampleColor {
    pub id: DbId,
    pub sample_id: DbId,
    pub color_id: DbId,
    pub name: String,
    pub code: String,
    pub pantone_code: Option<String>,
    pub hex: Option<String>,
}

/// A `sample_sizes` row joined with its size label.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SampleSize {
    pub id: DbId,
    pub sample_id: DbId,
    pub size_master_id: DbId,
    pub label: String,
    pub quantity: i32,
}

/// A `sample_materials` row joined with its material.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SampleMaterial {
    pub id: DbId,
    pub sample_id: DbId,
    pub material_id: DbId,
    pub material_name: String,
    pub composition: Option<String>,
    pub placement: Option<String>,
    pub consumption: Option<f64>,
}

/// A sample with all of its nested rows.
#[derive(Debug, Clone, Serialize)]
pub struct SampleDetail {
    #[serde(flatten)]
    pub sample: Sample,
    pub colors: Vec<SampleColor>,
    pub sizes: Vec<SampleSize>,
    pub materials: Vec<SampleMaterial>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SampleSizeInput {
    pub size_master_id: DbId,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SampleMaterialInput {
    pub material_id: DbId,
    pub placement: Option<String>,
    #[validate(range(min = 0.0, message = "consumption must not be negative"))]
    pub consumption: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSample {
    pub product_id: DbId,
    pub season_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    /// Generated as `{style_number}-S{NN}` when absent.
    pub sample_number: Option<String>,
    pub sample_type: Option<String>,
    /// Defaults to `REQUESTED`.
    pub status: Option<String>,
    pub requested_at: Option<NaiveDate>,
    pub received_at: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub colors: Vec<DbId>,
    #[serde(default)]
    #[validate(nested)]
    pub sizes: Vec<SampleSizeInput>,
    #[serde(default)]
    #[validate(nested)]
    pub materials: Vec<SampleMaterialInput>,
}

/// Patch body for the sample row only; nested rows are untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSample {
    pub season_id: Option<DbId>,
    pub supplier_id: Option<DbId>,
    #[validate(length(min = 1, message = "sample_number must not be empty"))]
    pub sample_number: Option<String>,
    pub sample_type: Option<String>,
    pub status: Option<String>,
    pub requested_at: Option<NaiveDate>,
    pub received_at: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /samples`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleFilter {
    pub product_id: Option<DbId>,
    pub status: Option<String>,
    pub season_id: Option<DbId>,
}
