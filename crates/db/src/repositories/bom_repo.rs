//! Repository for the `bom_items` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::bom::{BomItem, CreateBomItem};

/// Selected from a `b` alias joined to `materials m`.
const JOINED_COLUMNS: &str = "b.id, b.sample_id, b.material_id, m.name AS material_name, \
    b.quantity, b.unit, b.unit_cost, b.placement, b.created_at, b.updated_at";

/// Provides CRUD operations for bill-of-materials lines.
pub struct BomRepo;

impl BomRepo {
    pub async fn list_for_sample(
        pool: &PgPool,
        sample_id: DbId,
    ) -> Result<Vec<BomItem>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM bom_items b JOIN materials m ON m.id = b.material_id
             WHERE b.sample_id = $1
             ORDER BY b.id"
        );
        sqlx::query_as::<_, BomItem>(&query)
            .bind(sample_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        sample_id: DbId,
        input: &CreateBomItem,
    ) -> Result<BomItem, sqlx::Error> {
        let query = format!(
            "WITH b AS (
                INSERT INTO bom_items (sample_id, material_id, quantity, unit, unit_cost, placement)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM b JOIN materials m ON m.id = b.material_id"
        );
        sqlx::query_as::<_, BomItem>(&query)
            .bind(sample_id)
            .bind(input.material_id)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(input.unit_cost)
            .bind(&input.placement)
            .fetch_one(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateBomItem,
    ) -> Result<Option<BomItem>, sqlx::Error> {
        let query = format!(
            "WITH b AS (
                UPDATE bom_items SET
                    material_id = $2, quantity = $3, unit = $4, unit_cost = $5, placement = $6
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM b JOIN materials m ON m.id = b.material_id"
        );
        sqlx::query_as::<_, BomItem>(&query)
            .bind(id)
            .bind(input.material_id)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(input.unit_cost)
            .bind(&input.placement)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bom_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
