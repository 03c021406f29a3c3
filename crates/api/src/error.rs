use atelier_core::error::CoreError;
use atelier_integrations::IntegrationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A third-party service is not configured (missing credentials).
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// A third-party service failed. `status` is the upstream status code
    /// when there was one.
    #[error("Upstream error ({status:?}): {message}")]
    Upstream { status: Option<u16>, message: String },

    /// A third-party task did not finish in time.
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(format_validation_errors(&errors)))
    }
}

impl From<IntegrationError> for AppError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::MissingApiKey(var) => AppError::NotConfigured(var),
            IntegrationError::Api { status, body } => AppError::Upstream {
                status: Some(status),
                message: body,
            },
            IntegrationError::Request(e) => AppError::Upstream {
                status: None,
                message: e.to_string(),
            },
            IntegrationError::Parse(msg) => AppError::Upstream {
                status: None,
                message: msg,
            },
            e @ IntegrationError::Timeout { .. } => AppError::UpstreamTimeout(e.to_string()),
            IntegrationError::Database(e) => AppError::Database(e),
        }
    }
}

/// Flatten field errors into `field: message; field: message`, sorted by
/// field so the output is stable.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect_validation_errors("", errors, &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for e in list {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid ({})", e.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotConfigured(var) => {
                tracing::error!(setting = var, "Integration not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOT_CONFIGURED",
                    format!("{var} is not configured"),
                )
            }
            AppError::Upstream { status, message } => {
                tracing::warn!(upstream_status = ?status, error = %message, "Upstream API error");
                (
                    upstream_status(*status),
                    "UPSTREAM_ERROR",
                    format!("Upstream API error: {message}"),
                )
            }
            AppError::UpstreamTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Pass an upstream error status through; anything that is not a 4xx/5xx
/// becomes 502.
fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a `uq_*` constraint map to 409.
/// - Foreign-key violations map to 409.
/// - Check-constraint violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some("23503") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Referenced row is missing or still in use: {constraint}"),
                    );
                }
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
        month: i32,
    }

    #[test]
    fn validation_errors_flattened_and_sorted() {
        let probe = Probe {
            name: String::new(),
            month: 13,
        };
        let err: AppError = probe.validate().unwrap_err().into();
        match err {
            AppError::Core(CoreError::Validation(msg)) => assert_eq!(
                msg,
                "month: month must be between 1 and 12; name: name is required"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn upstream_status_passthrough() {
        assert_eq!(upstream_status(Some(429)), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream_status(Some(503)), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream_status(Some(200)), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(Some(42)), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream_status(None), StatusCode::BAD_GATEWAY);
    }
}
