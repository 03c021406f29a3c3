//! Handler for social trend search.

use atelier_core::error::CoreError;
use atelier_integrations::twitter::TrendTweet;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_MAX_RESULTS: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub query: String,
    pub max_results: Option<u32>,
}

/// GET /api/v1/trends/search
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TrendQuery>,
) -> AppResult<Json<DataResponse<Vec<TrendTweet>>>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(CoreError::Validation("query is required".into()).into());
    }
    let tweets = state
        .twitter
        .search_recent(query, params.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
        .await?;
    tracing::debug!(query, results = tweets.len(), "Trend search finished");
    Ok(Json(DataResponse { data: tweets }))
}
