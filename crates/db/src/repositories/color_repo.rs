//! Repository for the `colors` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::color::{Color, ColorFilter, CreateColor, UpdateColor};

const COLUMNS: &str = "id, name, code, pantone_code, hex, color_family, created_at, updated_at";

/// Provides CRUD operations for colors.
pub struct ColorRepo;

impl ColorRepo {
    pub async fn create(pool: &PgPool, input: &CreateColor) -> Result<Color, sqlx::Error> {
        let query = format!(
            "INSERT INTO colors (name, code, pantone_code, hex, color_family)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.pantone_code)
            .bind(&input.hex)
            .bind(&input.color_family)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Color>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM colors WHERE id = $1");
        sqlx::query_as::<_, Color>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, filter: &ColorFilter) -> Result<Vec<Color>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM colors
             WHERE ($1::TEXT IS NULL
                    OR name ILIKE '%' || $1 || '%'
                    OR code ILIKE '%' || $1 || '%'
                    OR pantone_code ILIKE '%' || $1 || '%')
             ORDER BY name"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateColor,
    ) -> Result<Option<Color>, sqlx::Error> {
        let query = format!(
            "UPDATE colors SET name = $2, code = $3, pantone_code = $4, hex = $5, color_family = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.pantone_code)
            .bind(&input.hex)
            .bind(&input.color_family)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateColor,
    ) -> Result<Option<Color>, sqlx::Error> {
        let query = format!(
            "UPDATE colors SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                pantone_code = COALESCE($4, pantone_code),
                hex = COALESCE($5, hex),
                color_family = COALESCE($6, color_family)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.pantone_code)
            .bind(&input.hex)
            .bind(&input.color_family)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM colors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
