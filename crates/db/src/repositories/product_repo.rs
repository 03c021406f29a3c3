//! Repository for the `products` table.
//!
//! Names arrive here already sanitized; see `atelier_core::naming`.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

const COLUMNS: &str = "id, style_number, name, category, division, status, season_id, \
    collection_id, description, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product. Status defaults to `DRAFT`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (style_number, name, category, division, status, season_id, collection_id, description)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'DRAFT'), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.style_number)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.division)
            .bind(&input.status)
            .bind(input.season_id)
            .bind(input.collection_id)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered list, most recently created first.
    pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::TEXT IS NULL
                    OR name ILIKE '%' || $1 || '%'
                    OR style_number ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR season_id = $3)
               AND ($4::TEXT IS NULL OR category ILIKE '%' || $4 || '%')
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&filter.search)
            .bind(&filter.status)
            .bind(filter.season_id)
            .bind(&filter.category)
            .fetch_all(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                style_number = $2, name = $3, category = $4, division = $5,
                status = COALESCE($6, 'DRAFT'), season_id = $7, collection_id = $8,
                description = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.style_number)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.division)
            .bind(&input.status)
            .bind(input.season_id)
            .bind(input.collection_id)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                style_number = COALESCE($2, style_number),
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                division = COALESCE($5, division),
                status = COALESCE($6, status),
                season_id = COALESCE($7, season_id),
                collection_id = COALESCE($8, collection_id),
                description = COALESCE($9, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.style_number)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.division)
            .bind(&input.status)
            .bind(input.season_id)
            .bind(input.collection_id)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Fails with a foreign-key violation while samples reference the product.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
