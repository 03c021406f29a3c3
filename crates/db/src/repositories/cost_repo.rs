//! Repository for the `costs` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::cost::{Cost, CreateCost, UpdateCost};

const COLUMNS: &str = "id, sample_id, material_cost, trim_cost, labor_cost, overhead_cost, \
    shipping_cost, duty_rate, target_retail_price, currency, notes, created_at, updated_at";

/// Provides CRUD operations for sample costings.
pub struct CostRepo;

impl CostRepo {
    pub async fn list_for_sample(pool: &PgPool, sample_id: DbId) -> Result<Vec<Cost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM costs WHERE sample_id = $1 ORDER BY id");
        sqlx::query_as::<_, Cost>(&query)
            .bind(sample_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM costs WHERE id = $1");
        sqlx::query_as::<_, Cost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a costing. Missing amounts are stored as zero.
    pub async fn create(
        pool: &PgPool,
        sample_id: DbId,
        input: &CreateCost,
    ) -> Result<Cost, sqlx::Error> {
        let query = format!(
            "INSERT INTO costs
                (sample_id, material_cost, trim_cost, labor_cost, overhead_cost,
                 shipping_cost, duty_rate, target_retail_price, currency, notes)
             VALUES ($1, COALESCE($2, 0), COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0),
                     COALESCE($6, 0), COALESCE($7, 0), $8, COALESCE($9, 'USD'), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cost>(&query)
            .bind(sample_id)
            .bind(input.material_cost)
            .bind(input.trim_cost)
            .bind(input.labor_cost)
            .bind(input.overhead_cost)
            .bind(input.shipping_cost)
            .bind(input.duty_rate)
            .bind(input.target_retail_price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateCost,
    ) -> Result<Option<Cost>, sqlx::Error> {
        let query = format!(
            "UPDATE costs SET
                material_cost = COALESCE($2, 0), trim_cost = COALESCE($3, 0),
                labor_cost = COALESCE($4, 0), overhead_cost = COALESCE($5, 0),
                shipping_cost = COALESCE($6, 0), duty_rate = COALESCE($7, 0),
                target_retail_price = $8, currency = COALESCE($9, 'USD'), notes = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cost>(&query)
            .bind(id)
            .bind(input.material_cost)
            .bind(input.trim_cost)
            .bind(input.labor_cost)
            .bind(input.overhead_cost)
            .bind(input.shipping_cost)
            .bind(input.duty_rate)
            .bind(input.target_retail_price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCost,
    ) -> Result<Option<Cost>, sqlx::Error> {
        let query = format!(
            "UPDATE costs SET
                material_cost = COALESCE($2, material_cost),
                trim_cost = COALESCE($3, trim_cost),
                labor_cost = COALESCE($4, labor_cost),
                overhead_cost = COALESCE($5, overhead_cost),
                shipping_cost = COALESCE($6, shipping_cost),
                duty_rate = COALESCE($7, duty_rate),
                target_retail_price = COALESCE($8, target_retail_price),
                currency = COALESCE($9, currency),
                notes = COALESCE($10, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cost>(&query)
            .bind(id)
            .bind(input.material_cost)
            .bind(input.trim_cost)
            .bind(input.labor_cost)
            .bind(input.overhead_cost)
            .bind(input.shipping_cost)
            .bind(input.duty_rate)
            .bind(input.target_retail_price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM costs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
