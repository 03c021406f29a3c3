//! Handlers for customer reviews and review analytics.

use std::sync::Arc;

use atelier_core::keywords::{extract_keywords, KeywordCount};
use atelier_core::types::DbId;
use atelier_db::models::review::{
    CreateReview, ProductRatingSummary, ProductReview, RatingBucket, ReviewFilter, TagCount,
};
use atelier_db::repositories::review_repo::PRODUCT_RANKING_LIMIT;
use atelier_db::repositories::ReviewRepo;
use atelier_integrations::gemini::TextGenerator;
use atelier_integrations::review_analysis::{AnalysisReport, ReviewAnalyzer};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reviews
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ReviewFilter>,
) -> AppResult<Json<DataResponse<Vec<ProductReview>>>> {
    let reviews = ReviewRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/reviews/{id}
pub async fn get(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProductReview>>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    Ok(Json(DataResponse { data: review }))
}

/// POST /api/v1/reviews
///
/// Upserts on `external_id`; re-importing a review with a changed body
/// clears its analysis.
pub async fn upsert(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductReview>>)> {
    input.validate()?;
    let review = ReviewRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        review_id = review.id,
        external_id = %review.external_id,
        "Review upserted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ReviewRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Review", id))
    }
}

/// GET /api/v1/reviews/analytics/ratings
pub async fn ratings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RatingBucket>>>> {
    let buckets = ReviewRepo::rating_distribution(&state.pool).await?;
    Ok(Json(DataResponse { data: buckets }))
}

/// GET /api/v1/reviews/analytics/top-products
pub async fn top_products(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProductRatingSummary>>>> {
    let products = ReviewRepo::top_products(&state.pool, PRODUCT_RANKING_LIMIT).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/reviews/analytics/bottom-products
pub async fn bottom_products(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProductRatingSummary>>>> {
    let products = ReviewRepo::bottom_products(&state.pool, PRODUCT_RANKING_LIMIT).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/reviews/analytics/tags
pub async fn tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<TagCount>>>> {
    let tags = ReviewRepo::tag_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/reviews/analytics/keywords
pub async fn keywords(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<KeywordCount>>>> {
    let texts = ReviewRepo::all_texts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: extract_keywords(&texts),
    }))
}

/// POST /api/v1/reviews/analyze
///
/// Runs one invocation of the summarisation job in the request.
pub async fn analyze(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AnalysisReport>>> {
    if !state.gemini.is_configured() {
        return Err(AppError::NotConfigured("GEMINI_API_KEY"));
    }
    let generator: Arc<dyn TextGenerator> = state.gemini.clone();
    let report = ReviewAnalyzer::new(generator).run(&state.pool).await?;
    tracing::info!(
        batches = report.batches,
        analyzed = report.analyzed,
        skipped = report.skipped,
        "Review analysis finished"
    );
    Ok(Json(DataResponse { data: report }))
}
