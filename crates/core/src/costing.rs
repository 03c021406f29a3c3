//! Cost roll-up for sample costings.

use serde::Serialize;

/// Raw cost inputs as stored on a `costs` row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostInputs {
    pub material_cost: f64,
    pub trim_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub shipping_cost: f64,
    /// Fraction, e.g. `0.12` for 12 %.
    pub duty_rate: f64,
    pub target_retail_price: Option<f64>,
}

/// Derived totals for a costing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub duty_amount: f64,
    pub landed_cost: f64,
    /// `None` unless a positive retail price is set.
    pub margin_amount: Option<f64>,
    /// Percentage of retail, two decimal places.
    pub margin_pct: Option<f64>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CostBreakdown {
    pub fn compute(inputs: &CostInputs) -> Self {
        let total_cost = inputs.material_cost
            + inputs.trim_cost
            + inputs.labor_cost
            + inputs.overhead_cost
            + inputs.shipping_cost;
        let duty_amount = total_cost * inputs.duty_rate;
        let landed_cost = total_cost + duty_amount;

        let (margin_amount, margin_pct) = match inputs.target_retail_price {
            Some(retail) if retail > 0.0 => {
                let margin = retail - landed_cost;
                (Some(round2(margin)), Some(round2(margin / retail * 100.0)))
            }
            _ => (None, None),
        };

        Self {
            total_cost: round2(total_cost),
            duty_amount: round2(duty_amount),
            landed_cost: round2(landed_cost),
            margin_amount,
            margin_pct,
        }
    }
}
