//! Status vocabularies for products, samples, milestone progress, and
//! quality inspections.
//!
//! Transitions are unconstrained; only membership in the vocabulary is
//! checked before a value is written.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Product status
// ---------------------------------------------------------------------------

pub const PRODUCT_DRAFT: &str = "DRAFT";
pub const PRODUCT_IN_DEVELOPMENT: &str = "IN_DEVELOPMENT";
pub const PRODUCT_APPROVED: &str = "APPROVED";
pub const PRODUCT_IN_PRODUCTION: &str = "IN_PRODUCTION";
pub const PRODUCT_DISCONTINUED: &str = "DISCONTINUED";

pub const PRODUCT_STATUSES: &[&str] = &[
    PRODUCT_DRAFT,
    PRODUCT_IN_DEVELOPMENT,
    PRODUCT_APPROVED,
    PRODUCT_IN_PRODUCTION,
    PRODUCT_DISCONTINUED,
];

// ---------------------------------------------------------------------------
// Sample status
// ---------------------------------------------------------------------------

pub const SAMPLE_REQUESTED: &str = "REQUESTED";
pub const SAMPLE_IN_PROGRESS: &str = "IN_PROGRESS";
pub const SAMPLE_RECEIVED: &str = "RECEIVED";
pub const SAMPLE_APPROVED: &str = "APPROVED";
pub const SAMPLE_REJECTED: &str = "REJECTED";

pub const SAMPLE_STATUSES: &[&str] = &[
    SAMPLE_REQUESTED,
    SAMPLE_IN_PROGRESS,
    SAMPLE_RECEIVED,
    SAMPLE_APPROVED,
    SAMPLE_REJECTED,
];

// ---------------------------------------------------------------------------
// Milestone progress status
// ---------------------------------------------------------------------------

pub const PROGRESS_NOT_STARTED: &str = "NOT_STARTED";
pub const PROGRESS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const PROGRESS_DONE: &str = "DONE";
pub const PROGRESS_BLOCKED: &str = "BLOCKED";

pub const PROGRESS_STATUSES: &[&str] = &[
    PROGRESS_NOT_STARTED,
    PROGRESS_IN_PROGRESS,
    PROGRESS_DONE,
    PROGRESS_BLOCKED,
];

// ---------------------------------------------------------------------------
// Inspection result
// ---------------------------------------------------------------------------

pub const INSPECTION_PENDING: &str = "PENDING";
pub const INSPECTION_PASS: &str = "PASS";
pub const INSPECTION_FAIL: &str = "FAIL";

pub const INSPECTION_RESULTS: &[&str] = &[INSPECTION_PENDING, INSPECTION_PASS, INSPECTION_FAIL];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that `value` belongs to `allowed`, naming `field` in the error.
pub fn validate_status(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Validate an optional status value; `None` is always accepted.
pub fn validate_optional_status(
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_status(field, v, allowed),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_product_status_accepted() {
        assert!(validate_status("status", PRODUCT_DRAFT, PRODUCT_STATUSES).is_ok());
    }

    #[test]
    fn unknown_status_rejected_with_allowed_list() {
        let err = validate_status("status", "SHIPPED", SAMPLE_STATUSES).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("SHIPPED"));
        assert!(msg.contains("REQUESTED"));
    }

    #[test]
    fn status_match_is_case_sensitive() {
        assert!(validate_status("status", "draft", PRODUCT_STATUSES).is_err());
    }

    #[test]
    fn absent_optional_status_accepted() {
        assert!(validate_optional_status("result", None, INSPECTION_RESULTS).is_ok());
        assert!(validate_optional_status("result", Some("MAYBE"), INSPECTION_RESULTS).is_err());
    }
}
