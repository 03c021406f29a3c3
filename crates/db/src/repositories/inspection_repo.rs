//! Repository for quality inspections, checklist items and care labels.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::inspection::{
    CareLabel, CreateInspection, CreateInspectionItem, InspectionDetail, InspectionFilter,
    InspectionItem, NewCareLabel, NewInspectionItem, QualityInspection, UpdateInspection,
    UpdateInspectionItem,
};

const COLUMNS: &str = "id, sample_id, category, color_depth, care_method, fibers, processings, \
    inspector, inspection_date, result, notes, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, inspection_id, category, item_name, standard, result, \
    is_ai_generated, is_derived, sort_order, created_at, updated_at";

const LABEL_COLUMNS: &str = "id, inspection_id, category, symbol_code, symbol_name, \
    description, sort_order, created_at, updated_at";

/// Provides CRUD for inspections and the transactional regeneration of
/// their derived rows.
pub struct InspectionRepo;

impl InspectionRepo {
    // -----------------------------------------------------------------------
    // Inspections
    // -----------------------------------------------------------------------

    pub async fn create(
        pool: &PgPool,
        input: &CreateInspection,
    ) -> Result<QualityInspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO quality_inspections
                (sample_id, category, color_depth, care_method, fibers, processings,
                 inspector, inspection_date, notes)
             VALUES ($1, $2, $3, COALESCE($4, 'machine_wash'), $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QualityInspection>(&query)
            .bind(input.sample_id)
            .bind(&input.category)
            .bind(&input.color_depth)
            .bind(&input.care_method)
            .bind(&input.fibers)
            .bind(&input.processings)
            .bind(&input.inspector)
            .bind(input.inspection_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QualityInspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quality_inspections WHERE id = $1");
        sqlx::query_as::<_, QualityInspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// An inspection with its items (in sort order) and care labels.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InspectionDetail>, sqlx::Error> {
        let Some(inspection) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::list_items(pool, id).await?;
        let label_query = format!(
            "SELECT {LABEL_COLUMNS} FROM care_labels WHERE inspection_id = $1
             ORDER BY sort_order, id"
        );
        let care_labels = sqlx::query_as::<_, CareLabel>(&label_query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(Some(InspectionDetail {
            inspection,
            items,
            care_labels,
        }))
    }

    pub async fn list(
        pool: &PgPool,
        filter: &InspectionFilter,
    ) -> Result<Vec<QualityInspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quality_inspections
             WHERE ($1::BIGINT IS NULL OR sample_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, QualityInspection>(&query)
            .bind(filter.sample_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInspection,
    ) -> Result<Option<QualityInspection>, sqlx::Error> {
        let query = format!(
            "UPDATE quality_inspections SET
                category = COALESCE($2, category),
                color_depth = COALESCE($3, color_depth),
                care_method = COALESCE($4, care_method),
                fibers = COALESCE($5, fibers),
                processings = COALESCE($6, processings),
                inspector = COALESCE($7, inspector),
                inspection_date = COALESCE($8, inspection_date),
                result = COALESCE($9, result),
                notes = COALESCE($10, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QualityInspection>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.color_depth)
            .bind(&input.care_method)
            .bind(&input.fibers)
            .bind(&input.processings)
            .bind(&input.inspector)
            .bind(input.inspection_date)
            .bind(&input.result)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Items and labels cascade with the inspection.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quality_inspections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace derived items and all care labels in one transaction.
    ///
    /// Items added by hand (`is_derived = false`) survive. The inspection's
    /// own `fibers` and `color_depth` are user input and are never written here.
    pub async fn replace_derived(
        pool: &PgPool,
        id: DbId,
        items: &[NewInspectionItem],
        labels: &[NewCareLabel],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM quality_inspection_items WHERE inspection_id = $1 AND is_derived")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM care_labels WHERE inspection_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO quality_inspection_items
                    (inspection_id, category, item_name, standard, is_ai_generated,
                     is_derived, sort_order)
                 VALUES ($1, $2, $3, $4, $5, TRUE, $6)",
            )
            .bind(id)
            .bind(&item.category)
            .bind(&item.item_name)
            .bind(&item.standard)
            .bind(item.is_ai_generated)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        for (position, label) in labels.iter().enumerate() {
            sqlx::query(
                "INSERT INTO care_labels
                    (inspection_id, category, symbol_code, symbol_name, description, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(id)
            .bind(&label.category)
            .bind(&label.symbol_code)
            .bind(&label.symbol_name)
            .bind(&label.description)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Derived items first, then manual ones, each in sort order.
    pub async fn list_items(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<InspectionItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM quality_inspection_items WHERE inspection_id = $1
             ORDER BY is_derived DESC, sort_order, id"
        );
        sqlx::query_as::<_, InspectionItem>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }

    /// Add a manual item; without `sort_order` it goes last.
    pub async fn add_item(
        pool: &PgPool,
        inspection_id: DbId,
        input: &CreateInspectionItem,
    ) -> Result<InspectionItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO quality_inspection_items
                (inspection_id, category, item_name, standard, is_ai_generated, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE), COALESCE($6,
                (SELECT COALESCE(MAX(sort_order), -1) + 1
                 FROM quality_inspection_items WHERE inspection_id = $1)))
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, InspectionItem>(&query)
            .bind(inspection_id)
            .bind(&input.category)
            .bind(&input.item_name)
            .bind(&input.standard)
            .bind(input.is_ai_generated)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update_item(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInspectionItem,
    ) -> Result<Option<InspectionItem>, sqlx::Error> {
        let query = format!(
            "UPDATE quality_inspection_items SET
                category = COALESCE($2, category),
                item_name = COALESCE($3, item_name),
                standard = COALESCE($4, standard),
                result = COALESCE($5, result),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, InspectionItem>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.item_name)
            .bind(&input.standard)
            .bind(&input.result)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_item(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quality_inspection_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
