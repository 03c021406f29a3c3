//! Financial and open-to-buy planning rows.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `financial_planning`, keyed by year, season, division and month.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FinancialPlan {
    pub id: DbId,
    pub year: i32,
    pub season_code: String,
    pub division_name: String,
    pub month: i32,
    pub planned_sales: Option<f64>,
    pub actual_sales: Option<f64>,
    pub planned_margin_pct: Option<f64>,
    pub actual_margin_pct: Option<f64>,
    pub planned_units: Option<i64>,
    pub actual_units: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One element of a bulk financial-plan upsert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertFinancialPlan {
    pub year: i32,
    #[validate(length(min = 1, message = "season_code is required"))]
    pub season_code: String,
    #[validate(length(min = 1, message = "division_name is required"))]
    pub division_name: String,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: i32,
    pub planned_sales: Option<f64>,
    pub actual_sales: Option<f64>,
    pub planned_margin_pct: Option<f64>,
    pub actual_margin_pct: Option<f64>,
    #[validate(range(min = 0, message = "planned_units must not be negative"))]
    pub planned_units: Option<i64>,
    #[validate(range(min = 0, message = "actual_units must not be negative"))]
    pub actual_units: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialPlanFilter {
    pub year: Option<i32>,
    pub season_code: Option<String>,
    pub division_name: Option<String>,
}

/// A row from `otb_planning`, keyed by style number and week.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OtbPlan {
    pub id: DbId,
    pub style_number: String,
    pub week_number: i32,
    pub planned_units: i64,
    pub received_units: i64,
    pub sold_units: i64,
    pub otb_units: i64,
    pub unit_cost: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One element of a bulk OTB upsert. `otb_units` is derived when absent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertOtbPlan {
    #[validate(length(min = 1, message = "style_number is required"))]
    pub style_number: String,
    #[validate(range(min = 1, max = 53, message = "week_number must be between 1 and 53"))]
    pub week_number: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "planned_units must not be negative"))]
    pub planned_units: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "received_units must not be negative"))]
    pub received_units: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "sold_units must not be negative"))]
    pub sold_units: i64,
    #[validate(range(min = 0, message = "otb_units must not be negative"))]
    pub otb_units: Option<i64>,
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtbPlanFilter {
    pub style_number: Option<String>,
}

/// Body for `PATCH /{id}/field`.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: f64,
}
