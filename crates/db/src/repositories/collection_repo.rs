//! Repository for the `collections` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{
    Collection, CollectionFilter, CreateCollection, UpdateCollection,
};

const COLUMNS: &str = "id, season_id, name, description, created_at, updated_at";

/// Provides CRUD operations for collections.
pub struct CollectionRepo;

impl CollectionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (season_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(input.season_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List collections, optionally restricted to one season.
    pub async fn list(
        pool: &PgPool,
        filter: &CollectionFilter,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE ($1::BIGINT IS NULL OR season_id = $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(filter.season_id)
            .fetch_all(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET season_id = $2, name = $3, description = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(input.season_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                season_id = COALESCE($2, season_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(input.season_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
