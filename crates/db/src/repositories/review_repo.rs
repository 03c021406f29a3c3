//! Repository for `product_reviews`, including the analytics aggregates and
//! the cursor used by the summarisation batch job.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{
    CreateReview, PendingReview, ProductRatingSummary, ProductReview, RatingBucket, ReviewFilter,
    TagCount,
};

const COLUMNS: &str = "id, external_id, product_id, product_name, product_code, rating, title, \
    body, author, review_date, summary_en, tags, analyzed_at, created_at, updated_at";

/// Default page size for review listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for review listing.
const MAX_LIMIT: i64 = 200;

/// Average rating at or above which a product ranks as "top".
pub const TOP_PRODUCT_MIN_RATING: f64 = 4.5;

/// Average rating at or below which a product ranks as "bottom".
pub const BOTTOM_PRODUCT_MAX_RATING: f64 = 3.0;

/// Products returned by each ranking.
pub const PRODUCT_RANKING_LIMIT: i64 = 10;

/// Provides storage and aggregate queries for customer reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert or update a review by `external_id`.
    ///
    /// If the body changes, the stored summary and tags are cleared so the
    /// batch job analyses the new text.
    pub async fn upsert(pool: &PgPool, input: &CreateReview) -> Result<ProductReview, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_reviews
                (external_id, product_id, product_name, product_code, rating, title, body,
                 author, review_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT ON CONSTRAINT uq_product_reviews_external_id DO UPDATE SET
                product_id = EXCLUDED.product_id,
                product_name = EXCLUDED.product_name,
                product_code = EXCLUDED.product_code,
                rating = EXCLUDED.rating,
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                author = EXCLUDED.author,
                review_date = EXCLUDED.review_date,
                summary_en = CASE WHEN product_reviews.body IS DISTINCT FROM EXCLUDED.body
                                  THEN NULL ELSE product_reviews.summary_en END,
                tags = CASE WHEN product_reviews.body IS DISTINCT FROM EXCLUDED.body
                            THEN '{{}}' ELSE product_reviews.tags END,
                analyzed_at = CASE WHEN product_reviews.body IS DISTINCT FROM EXCLUDED.body
                                   THEN NULL ELSE product_reviews.analyzed_at END
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductReview>(&query)
            .bind(&input.external_id)
            .bind(input.product_id)
            .bind(&input.product_name)
            .bind(&input.product_code)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.author)
            .bind(input.review_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductReview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_reviews WHERE id = $1");
        sqlx::query_as::<_, ProductReview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, paginated list, newest review first.
    pub async fn list(
        pool: &PgPool,
        filter: &ReviewFilter,
    ) -> Result<Vec<ProductReview>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = filter.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM product_reviews
             WHERE ($1::TEXT IS NULL OR product_code = $1)
               AND ($2::FLOAT8 IS NULL OR rating >= $2)
               AND ($3::FLOAT8 IS NULL OR rating <= $3)
               AND ($4::TEXT IS NULL
                    OR title ILIKE '%' || $4 || '%'
                    OR body ILIKE '%' || $4 || '%')
             ORDER BY review_date DESC NULLS LAST, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, ProductReview>(&query)
            .bind(&filter.product_code)
            .bind(filter.min_rating)
            .bind(filter.max_rating)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// Review count per star, 1 through 5. Every bucket is present.
    ///
    /// Ratings round half away from zero; anything below 1 counts as 1.
    pub async fn rating_distribution(pool: &PgPool) -> Result<Vec<RatingBucket>, sqlx::Error> {
        sqlx::query_as::<_, RatingBucket>(
            "SELECT s.star AS rating, COUNT(r.id) AS count
             FROM generate_series(1, 5) AS s(star)
             LEFT JOIN product_reviews r
                    ON GREATEST(1, ROUND(r.rating::NUMERIC))::INTEGER = s.star
             GROUP BY s.star
             ORDER BY s.star",
        )
        .fetch_all(pool)
        .await
    }

    /// Products averaging at least [`TOP_PRODUCT_MIN_RATING`], most reviewed first.
    pub async fn top_products(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ProductRatingSummary>, sqlx::Error> {
        Self::ranked_products(pool, "AVG(rating) >= $1", TOP_PRODUCT_MIN_RATING, limit).await
    }

    /// Products averaging at most [`BOTTOM_PRODUCT_MAX_RATING`], most reviewed first.
    pub async fn bottom_products(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ProductRatingSummary>, sqlx::Error> {
        Self::ranked_products(pool, "AVG(rating) <= $1", BOTTOM_PRODUCT_MAX_RATING, limit).await
    }

    async fn ranked_products(
        pool: &PgPool,
        having: &str,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<ProductRatingSummary>, sqlx::Error> {
        let query = format!(
            "SELECT product_code,
                    MAX(product_name) AS product_name,
                    COUNT(*) AS review_count,
                    AVG(rating)::FLOAT8 AS average_rating
             FROM product_reviews
             WHERE product_code IS NOT NULL
             GROUP BY product_code
             HAVING {having}
             ORDER BY review_count DESC, product_code
             LIMIT $2"
        );
        sqlx::query_as::<_, ProductRatingSummary>(&query)
            .bind(threshold)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Frequency of every tag, most frequent first, ties by tag.
    pub async fn tag_counts(pool: &PgPool) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT tag, COUNT(*) AS count
             FROM product_reviews, unnest(tags) AS tag
             GROUP BY tag
             ORDER BY count DESC, tag",
        )
        .fetch_all(pool)
        .await
    }

    /// Title and body of every review, joined, for keyword extraction.
    pub async fn all_texts(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT CONCAT_WS(' ', title, body) FROM product_reviews ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Summarisation batch job
    // -----------------------------------------------------------------------

    /// Next reviews without an English summary, in id order after `after_id`.
    pub async fn pending_batch(
        pool: &PgPool,
        after_id: DbId,
        limit: i64,
    ) -> Result<Vec<PendingReview>, sqlx::Error> {
        sqlx::query_as::<_, PendingReview>(
            "SELECT id, rating, title, body FROM product_reviews
             WHERE summary_en IS NULL AND id > $1
             ORDER BY id
             LIMIT $2",
        )
        .bind(after_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Store a summary and tags. Only fills a review that has no summary yet;
    /// returns `false` if nothing was updated.
    pub async fn apply_analysis(
        pool: &PgPool,
        id: DbId,
        summary: &str,
        tags: &[String],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE product_reviews SET summary_en = $2, tags = $3, analyzed_at = NOW()
             WHERE id = $1 AND summary_en IS NULL",
        )
        .bind(id)
        .bind(summary)
        .bind(tags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
