//! Financial and open-to-buy planning rules.
//!
//! Update-by-field endpoints interpolate a column name into SQL, so the
//! requested field must resolve through an allow-list first.

use crate::error::CoreError;

/// Numeric columns of `financial_planning` that may be updated one at a time.
pub const FINANCIAL_UPDATABLE_FIELDS: &[&str] = &[
    "planned_sales",
    "actual_sales",
    "planned_margin_pct",
    "actual_margin_pct",
    "planned_units",
    "actual_units",
];

/// Numeric columns of `otb_planning` that may be updated one at a time.
pub const OTB_UPDATABLE_FIELDS: &[&str] = &[
    "planned_units",
    "received_units",
    "sold_units",
    "otb_units",
    "unit_cost",
];

/// Resolve a client-supplied field name to its static column name.
pub fn resolve_field(field: &str, allowed: &'static [&'static str]) -> Result<&'static str, CoreError> {
    allowed
        .iter()
        .copied()
        .find(|f| *f == field)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Field '{field}' cannot be updated. Allowed fields: {}",
                allowed.join(", ")
            ))
        })
}

/// Updatable columns stored as whole units; the rest are amounts.
pub const UNIT_FIELDS: &[&str] = &[
    "planned_units",
    "actual_units",
    "received_units",
    "sold_units",
    "otb_units",
];

/// A checked value for a single-field update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Units(i64),
    Amount(f64),
}

/// Check a client-supplied number against the column it is written to.
///
/// Unit columns take the value rounded to the nearest whole number and
/// reject anything negative or beyond `i64`.
pub fn field_value(column: &str, value: f64) -> Result<FieldValue, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation("value must be a finite number".into()));
    }
    if !UNIT_FIELDS.contains(&column) {
        return Ok(FieldValue::Amount(value));
    }
    let rounded = value.round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if rounded < 0.0 || rounded >= i64::MAX as f64 {
        return Err(CoreError::Validation(format!(
            "{column} must be a whole number of units between 0 and {}",
            i64::MAX
        )));
    }
    Ok(FieldValue::Units(rounded as i64))
}

/// Open-to-buy units: planned minus received, never negative.
pub fn compute_otb_units(planned_units: i64, received_units: i64) -> i64 {
    planned_units.saturating_sub(received_units).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_field_resolves_to_column() {
        assert_eq!(
            resolve_field("actual_sales", FINANCIAL_UPDATABLE_FIELDS).unwrap(),
            "actual_sales"
        );
    }

    #[test]
    fn key_columns_are_not_updatable() {
        for key in ["year", "season_code", "division_name", "month", "id"] {
            assert!(resolve_field(key, FINANCIAL_UPDATABLE_FIELDS).is_err());
        }
        assert!(resolve_field("week_number", OTB_UPDATABLE_FIELDS).is_err());
    }

    #[test]
    fn injection_attempt_rejected() {
        let err = resolve_field("otb_units = 0; DROP TABLE otb_planning", OTB_UPDATABLE_FIELDS)
            .unwrap_err();
        assert!(err.to_string().contains("cannot be updated"));
    }

    #[test]
    fn otb_units_never_negative() {
        assert_eq!(compute_otb_units(100, 40), 60);
        assert_eq!(compute_otb_units(10, 40), 0);
    }

    #[test]
    fn otb_units_saturate_at_extremes() {
        assert_eq!(compute_otb_units(0, i64::MIN), i64::MAX);
        assert_eq!(compute_otb_units(i64::MIN, i64::MAX), 0);
    }

    #[test]
    fn unit_fields_round_and_stay_in_range() {
        assert_eq!(field_value("sold_units", 41.6).unwrap(), FieldValue::Units(42));
        assert_eq!(field_value("unit_cost", -2.5).unwrap(), FieldValue::Amount(-2.5));
        assert!(field_value("sold_units", -1.0).is_err());
        assert!(field_value("otb_units", 1e300).is_err());
        assert!(field_value("otb_units", i64::MAX as f64).is_err());
        assert!(field_value("actual_sales", f64::NAN).is_err());
    }
}
