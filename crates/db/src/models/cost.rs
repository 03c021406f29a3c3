//! Sample costing rows and their derived totals.

use atelier_core::costing::{CostBreakdown, CostInputs};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `costs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cost {
    pub id: DbId,
    pub sample_id: DbId,
    pub material_cost: f64,
    pub trim_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub shipping_cost: f64,
    pub duty_rate: f64,
    pub target_retail_price: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cost {
    pub fn inputs(&self) -> CostInputs {
        CostInputs {
            material_cost: self.material_cost,
            trim_cost: self.trim_cost,
            labor_cost: self.labor_cost,
            overhead_cost: self.overhead_cost,
            shipping_cost: self.shipping_cost,
            duty_rate: self.duty_rate,
            target_retail_price: self.target_retail_price,
        }
    }
}

/// A cost row with its computed totals, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CostWithTotals {
    #[serde(flatten)]
    pub cost: Cost,
    #[serde(flatten)]
    pub totals: CostBreakdown,
}

impl From<Cost> for CostWithTotals {
    fn from(cost: Cost) -> Self {
        let totals = CostBreakdown::compute(&cost.inputs());
        Self { cost, totals }
    }
}

/// Body for creating or replacing a costing. Missing amounts are zero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCost {
    #[validate(range(min = 0.0, message = "material_cost must not be negative"))]
    pub material_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "trim_cost must not be negative"))]
    pub trim_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "labor_cost must not be negative"))]
    pub labor_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "overhead_cost must not be negative"))]
    pub overhead_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "shipping_cost must not be negative"))]
    pub shipping_cost: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "duty_rate must be a fraction between 0 and 1"))]
    pub duty_rate: Option<f64>,
    #[validate(range(min = 0.0, message = "target_retail_price must not be negative"))]
    pub target_retail_price: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCost {
    #[validate(range(min = 0.0, message = "material_cost must not be negative"))]
    pub material_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "trim_cost must not be negative"))]
    pub trim_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "labor_cost must not be negative"))]
    pub labor_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "overhead_cost must not be negative"))]
    pub overhead_cost: Option<f64>,
    #[validate(range(min = 0.0, message = "shipping_cost must not be negative"))]
    pub shipping_cost: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "duty_rate must be a fraction between 0 and 1"))]
    pub duty_rate: Option<f64>,
    #[validate(range(min = 0.0, message = "target_retail_price must not be negative"))]
    pub target_retail_price: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}
