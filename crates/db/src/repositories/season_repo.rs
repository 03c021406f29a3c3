//! Repository for the `seasons` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::season::{CreateSeason, Season, UpdateSeason};

const COLUMNS: &str = "id, code, name, year, start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for seasons.
pub struct SeasonRepo;

impl SeasonRepo {
    pub async fn create(pool: &PgPool, input: &CreateSeason) -> Result<Season, sqlx::Error> {
        let query = format!(
            "INSERT INTO seasons (code, name, year, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Season>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.year)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE id = $1");
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest year first, then by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons ORDER BY year DESC, code");
        sqlx::query_as::<_, Season>(&query).fetch_all(pool).await
    }

    /// Overwrite every column. Returns `None` if the row does not exist.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateSeason,
    ) -> Result<Option<Season>, sqlx::Error> {
        let query = format!(
            "UPDATE seasons SET code = $2, name = $3, year = $4, start_date = $5, end_date = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.year)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Apply only the fields present in `input`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeason,
    ) -> Result<Option<Season>, sqlx::Error> {
        let query = format!(
            "UPDATE seasons SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                year = COALESCE($4, year),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Season>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.year)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
