//! Repository for the `size_groups` and `size_masters` tables.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::size::{
    CreateSizeGroup, CreateSizeMaster, SizeGroup, SizeMaster, UpdateSizeGroup,
};

const GROUP_COLUMNS: &str = "id, name, description, created_at, updated_at";

const SIZE_COLUMNS: &str = "id, size_group_id, label, sort_order, created_at, updated_at";

/// Provides CRUD operations for size groups and their sizes.
pub struct SizeRepo;

impl SizeRepo {
    // -----------------------------------------------------------------------
    // Size groups
    // -----------------------------------------------------------------------

    pub async fn create_group(
        pool: &PgPool,
        input: &CreateSizeGroup,
    ) -> Result<SizeGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO size_groups (name, description) VALUES ($1, $2)
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, SizeGroup>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_group(pool: &PgPool, id: DbId) -> Result<Option<SizeGroup>, sqlx::Error> {
        let query = format!("SELECT {GROUP_COLUMNS} FROM size_groups WHERE id = $1");
        sqlx::query_as::<_, SizeGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_groups(pool: &PgPool) -> Result<Vec<SizeGroup>, sqlx::Error> {
        let query = format!("SELECT {GROUP_COLUMNS} FROM size_groups ORDER BY name");
        sqlx::query_as::<_, SizeGroup>(&query).fetch_all(pool).await
    }

    pub async fn replace_group(
        pool: &PgPool,
        id: DbId,
        input: &CreateSizeGroup,
    ) -> Result<Option<SizeGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE size_groups SET name = $2, description = $3 WHERE id = $1
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, SizeGroup>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_group(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSizeGroup,
    ) -> Result<Option<SizeGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE size_groups SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, SizeGroup>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Deleting a group cascades to its sizes.
    pub async fn delete_group(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM size_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Sizes
    // -----------------------------------------------------------------------

    /// Sizes of a group in display order.
    pub async fn list_sizes(
        pool: &PgPool,
        size_group_id: DbId,
    ) -> Result<Vec<SizeMaster>, sqlx::Error> {
        let query = format!(
            "SELECT {SIZE_COLUMNS} FROM size_masters
             WHERE size_group_id = $1
             ORDER BY sort_order, label"
        );
        sqlx::query_as::<_, SizeMaster>(&query)
            .bind(size_group_id)
            .fetch_all(pool)
            .await
    }

    /// Add a size to a group. Without an explicit `sort_order` it goes last.
    pub async fn create_size(
        pool: &PgPool,
        size_group_id: DbId,
        input: &CreateSizeMaster,
    ) -> Result<SizeMaster, sqlx::Error> {
        let query = format!(
            "INSERT INTO size_masters (size_group_id, label, sort_order)
             VALUES ($1, $2, COALESCE($3,
                (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM size_masters WHERE size_group_id = $1)))
             RETURNING {SIZE_COLUMNS}"
        );
        sqlx::query_as::<_, SizeMaster>(&query)
            .bind(size_group_id)
            .bind(&input.label)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn replace_size(
        pool: &PgPool,
        id: DbId,
        input: &CreateSizeMaster,
    ) -> Result<Option<SizeMaster>, sqlx::Error> {
        let query = format!(
            "UPDATE size_masters SET label = $2, sort_order = COALESCE($3, sort_order)
             WHERE id = $1
             RETURNING {SIZE_COLUMNS}"
        );
        sqlx::query_as::<_, SizeMaster>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_size(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM size_masters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
