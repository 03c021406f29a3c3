//! Repository for the `materials` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::material::{
    CreateMaterial, Material, MaterialDeletion, MaterialFilter, MaterialUsage, UpdateMaterial,
};

const COLUMNS: &str = "id, name, code, category, composition, weight_gsm, width_cm, \
    unit_price, currency, supplier_id, notes, created_at, updated_at";

const USAGE_QUERY: &str = "SELECT
    (SELECT COUNT(*) FROM bom_items WHERE material_id = $1) AS bom_items,
    (SELECT COUNT(*) FROM sample_materials WHERE material_id = $1) AS sample_materials";

/// Provides CRUD operations for materials.
pub struct MaterialRepo;

impl MaterialRepo {
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials
                (name, code, category, composition, weight_gsm, width_cm,
                 unit_price, currency, supplier_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'USD'), $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.category)
            .bind(&input.composition)
            .bind(input.weight_gsm)
            .bind(input.width_cm)
            .bind(input.unit_price)
            .bind(&input.currency)
            .bind(input.supplier_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &MaterialFilter,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials
             WHERE ($1::TEXT IS NULL
                    OR name ILIKE '%' || $1 || '%'
                    OR code ILIKE '%' || $1 || '%'
                    OR composition ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR category ILIKE $2)
               AND ($3::BIGINT IS NULL OR supplier_id = $3)
             ORDER BY name"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(filter.supplier_id)
            .fetch_all(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET
                name = $2, code = $3, category = $4, composition = $5,
                weight_gsm = $6, width_cm = $7, unit_price = $8,
                currency = COALESCE($9, 'USD'), supplier_id = $10, notes = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.category)
            .bind(&input.composition)
            .bind(input.weight_gsm)
            .bind(input.width_cm)
            .bind(input.unit_price)
            .bind(&input.currency)
            .bind(input.supplier_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                category = COALESCE($4, category),
                composition = COALESCE($5, composition),
                weight_gsm = COALESCE($6, weight_gsm),
                width_cm = COALESCE($7, width_cm),
                unit_price = COALESCE($8, unit_price),
                currency = COALESCE($9, currency),
                supplier_id = COALESCE($10, supplier_id),
                notes = COALESCE($11, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.category)
            .bind(&input.composition)
            .bind(input.weight_gsm)
            .bind(input.width_cm)
            .bind(input.unit_price)
            .bind(&input.currency)
            .bind(input.supplier_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Count BOM lines and sample-material rows that reference a material.
    pub async fn usage(pool: &PgPool, id: DbId) -> Result<MaterialUsage, sqlx::Error> {
        sqlx::query_as::<_, MaterialUsage>(USAGE_QUERY)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a material unless BOM lines or samples still reference it.
    ///
    /// The row is locked first so no reference can be added between the
    /// usage check and the delete.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<MaterialDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query("SELECT id FROM materials WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(MaterialDeletion::NotFound);
        }

        let usage = sqlx::query_as::<_, MaterialUsage>(USAGE_QUERY)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if usage.is_referenced() {
            return Ok(MaterialDeletion::InUse(usage));
        }

        sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(MaterialDeletion::Deleted)
    }
}
