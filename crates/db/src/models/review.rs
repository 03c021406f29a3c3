//! Customer reviews and the aggregate shapes returned by review analytics.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `product_reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductReview {
    pub id: DbId,
    pub external_id: String,
    pub product_id: Option<DbId>,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub rating: f64,
    pub title: Option<String>,
    pub body: String,
    pub author: Option<String>,
    pub review_date: Option<Timestamp>,
    pub summary_en: Option<String>,
    pub tags: Vec<String>,
    pub analyzed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /reviews`; upserts on `external_id`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(length(min = 1, message = "external_id is required"))]
    pub external_id: String,
    pub product_id: Option<DbId>,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    pub author: Option<String>,
    pub review_date: Option<Timestamp>,
}

/// Query parameters for `GET /reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFilter {
    pub product_code: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// Case-insensitive substring over title and body.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Count of reviews for one rounded star value.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

/// Per-product rating aggregate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductRatingSummary {
    pub product_code: String,
    pub product_name: Option<String>,
    pub review_count: i64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

/// The fields of an unanalyzed review sent for summarisation.
#[derive(Debug, Clone, FromRow)]
pub struct PendingReview {
    pub id: DbId,
    pub rating: f64,
    pub title: Option<String>,
    pub body: String,
}
