//! Repository for the `suppliers` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::supplier::{CreateSupplier, Supplier, SupplierFilter, UpdateSupplier};

const COLUMNS: &str = "id, name, code, country, contact_name, email, phone, notes, \
    created_at, updated_at";

/// Provides CRUD operations for suppliers.
pub struct SupplierRepo;

impl SupplierRepo {
    pub async fn create(pool: &PgPool, input: &CreateSupplier) -> Result<Supplier, sqlx::Error> {
        let query = format!(
            "INSERT INTO suppliers (name, code, country, contact_name, email, phone, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.country)
            .bind(&input.contact_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1");
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `search` matches name or code; `country` is case-insensitive exact.
    pub async fn list(
        pool: &PgPool,
        filter: &SupplierFilter,
    ) -> Result<Vec<Supplier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM suppliers
             WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR code ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR country ILIKE $2)
             ORDER BY name"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(&filter.search)
            .bind(&filter.country)
            .fetch_all(pool)
            .await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateSupplier,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!(
            "UPDATE suppliers SET
                name = $2, code = $3, country = $4, contact_name = $5,
                email = $6, phone = $7, notes = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.country)
            .bind(&input.contact_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSupplier,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!(
            "UPDATE suppliers SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                country = COALESCE($4, country),
                contact_name = COALESCE($5, contact_name),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                notes = COALESCE($8, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.country)
            .bind(&input.contact_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
