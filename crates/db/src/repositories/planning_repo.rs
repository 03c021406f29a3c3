//! Repositories for `financial_planning` and `otb_planning`.
//!
//! Both tables are edited as grids: bulk upserts on the natural key plus
//! single-cell updates through an allow-listed column name.

use atelier_core::planning::{compute_otb_units, FieldValue};
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::planning::{
    FinancialPlan, FinancialPlanFilter, OtbPlan, OtbPlanFilter, UpsertFinancialPlan, UpsertOtbPlan,
};

const FINANCIAL_COLUMNS: &str = "id, year, season_code, division_name, month, \
    planned_sales, actual_sales, planned_margin_pct, actual_margin_pct, \
    planned_units, actual_units, created_at, updated_at";

const OTB_COLUMNS: &str = "id, style_number, week_number, planned_units, received_units, \
    sold_units, otb_units, unit_cost, created_at, updated_at";

// ---------------------------------------------------------------------------
// Financial planning
// ---------------------------------------------------------------------------

/// Provides grid operations for financial plans.
pub struct FinancialPlanRepo;

impl FinancialPlanRepo {
    pub async fn list(
        pool: &PgPool,
        filter: &FinancialPlanFilter,
    ) -> Result<Vec<FinancialPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {FINANCIAL_COLUMNS} FROM financial_planning
             WHERE ($1::INTEGER IS NULL OR year = $1)
               AND ($2::TEXT IS NULL OR season_code = $2)
               AND ($3::TEXT IS NULL OR division_name = $3)
             ORDER BY year, season_code, division_name, month"
        );
        sqlx::query_as::<_, FinancialPlan>(&query)
            .bind(filter.year)
            .bind(&filter.season_code)
            .bind(&filter.division_name)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FinancialPlan>, sqlx::Error> {
        let query = format!("SELECT {FINANCIAL_COLUMNS} FROM financial_planning WHERE id = $1");
        sqlx::query_as::<_, FinancialPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update every row in one transaction, keyed by
    /// `(year, season_code, division_name, month)`. Absent values keep the
    /// stored ones.
    pub async fn upsert_many(
        pool: &PgPool,
        rows: &[UpsertFinancialPlan],
    ) -> Result<Vec<FinancialPlan>, sqlx::Error> {
        let query = format!(
            "INSERT INTO financial_planning
                (year, season_code, division_name, month, planned_sales, actual_sales,
                 planned_margin_pct, actual_margin_pct, planned_units, actual_units)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT ON CONSTRAINT uq_financial_planning_period DO UPDATE SET
                planned_sales = COALESCE(EXCLUDED.planned_sales, financial_planning.planned_sales),
                actual_sales = COALESCE(EXCLUDED.actual_sales, financial_planning.actual_sales),
                planned_margin_pct = COALESCE(EXCLUDED.planned_margin_pct, financial_planning.planned_margin_pct),
                actual_margin_pct = COALESCE(EXCLUDED.actual_margin_pct, financial_planning.actual_margin_pct),
                planned_units = COALESCE(EXCLUDED.planned_units, financial_planning.planned_units),
                actual_units = COALESCE(EXCLUDED.actual_units, financial_planning.actual_units)
             RETURNING {FINANCIAL_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(rows.len());
        for row in rows {
            let plan = sqlx::query_as::<_, FinancialPlan>(&query)
                .bind(row.year)
                .bind(&row.season_code)
                .bind(&row.division_name)
                .bind(row.month)
                .bind(row.planned_sales)
                .bind(row.actual_sales)
                .bind(row.planned_margin_pct)
                .bind(row.actual_margin_pct)
                .bind(row.planned_units)
                .bind(row.actual_units)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(plan);
        }
        tx.commit().await?;
        Ok(saved)
    }

    /// Set one numeric column. `column` must come from
    /// `atelier_core::planning::FINANCIAL_UPDATABLE_FIELDS`.
    pub async fn update_field(
        pool: &PgPool,
        id: DbId,
        column: &'static str,
        value: FieldValue,
    ) -> Result<Option<FinancialPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE financial_planning SET {column} = $2 WHERE id = $1
             RETURNING {FINANCIAL_COLUMNS}"
        );
        let q = sqlx::query_as::<_, FinancialPlan>(&query).bind(id);
        let q = match value {
            FieldValue::Units(units) => q.bind(units),
            FieldValue::Amount(amount) => q.bind(amount),
        };
        q.fetch_optional(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM financial_planning WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Open-to-buy planning
// ---------------------------------------------------------------------------

/// Provides grid operations for OTB plans.
pub struct OtbPlanRepo;

impl OtbPlanRepo {
    pub async fn list(pool: &PgPool, filter: &OtbPlanFilter) -> Result<Vec<OtbPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {OTB_COLUMNS} FROM otb_planning
             WHERE ($1::TEXT IS NULL OR style_number = $1)
             ORDER BY style_number, week_number"
        );
        sqlx::query_as::<_, OtbPlan>(&query)
            .bind(&filter.style_number)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite every row in one transaction, keyed by
    /// `(style_number, week_number)`. A missing `otb_units` is derived from
    /// planned and received units.
    pub async fn upsert_many(
        pool: &PgPool,
        rows: &[UpsertOtbPlan],
    ) -> Result<Vec<OtbPlan>, sqlx::Error> {
        let query = format!(
            "INSERT INTO otb_planning
                (style_number, week_number, planned_units, received_units, sold_units,
                 otb_units, unit_cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_otb_planning_style_week DO UPDATE SET
                planned_units = EXCLUDED.planned_units,
                received_units = EXCLUDED.received_units,
                sold_units = EXCLUDED.sold_units,
                otb_units = EXCLUDED.otb_units,
                unit_cost = COALESCE(EXCLUDED.unit_cost, otb_planning.unit_cost)
             RETURNING {OTB_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut saved = Vec::with_capacity(rows.len());
        for row in rows {
            let otb_units = row
                .otb_units
                .unwrap_or_else(|| compute_otb_units(row.planned_units, row.received_units));
            let plan = sqlx::query_as::<_, OtbPlan>(&query)
                .bind(&row.style_number)
                .bind(row.week_number)
                .bind(row.planned_units)
                .bind(row.received_units)
                .bind(row.sold_units)
                .bind(otb_units)
                .bind(row.unit_cost)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(plan);
        }
        tx.commit().await?;
        Ok(saved)
    }

    /// Set one numeric column. `column` must come from
    /// `atelier_core::planning::OTB_UPDATABLE_FIELDS`.
    ///
    /// Changing planned or received units re-derives `otb_units`.
    pub async fn update_field(
        pool: &PgPool,
        id: DbId,
        column: &'static str,
        value: FieldValue,
    ) -> Result<Option<OtbPlan>, sqlx::Error> {
        let derived = match column {
            "planned_units" => ", otb_units = GREATEST($2 - received_units, 0)",
            "received_units" => ", otb_units = GREATEST(planned_units - $2, 0)",
            _ => "",
        };
        let query = format!(
            "UPDATE otb_planning SET {column} = $2{derived} WHERE id = $1
             RETURNING {OTB_COLUMNS}"
        );
        let q = sqlx::query_as::<_, OtbPlan>(&query).bind(id);
        let q = match value {
            FieldValue::Units(units) => q.bind(units),
            FieldValue::Amount(amount) => q.bind(amount),
        };
        q.fetch_optional(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM otb_planning WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
