//! Handler for AI design generation.

use atelier_core::error::CoreError;
use atelier_integrations::freepik::{DesignOutcome, DesignRequest};
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/designs/generate
///
/// Submits the prompt and polls until the task completes, fails, or the
/// poll budget runs out (504).
pub async fn generate(
    State(state): State<AppState>,
    AppJson(input): AppJson<DesignRequest>,
) -> AppResult<Json<DataResponse<DesignOutcome>>> {
    if input.prompt.trim().is_empty() {
        return Err(CoreError::Validation("prompt is required".into()).into());
    }
    let outcome = state.freepik.generate(&input).await?;
    Ok(Json(DataResponse { data: outcome }))
}
