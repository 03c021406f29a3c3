//! Repository for `milestones` and `sample_milestone_progress`.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::milestone::{
    CreateMilestone, Milestone, MilestoneProgress, UpdateMilestone, UpsertProgress,
};

const COLUMNS: &str = "id, name, description, sort_order, default_offset_days, \
    created_at, updated_at";

/// Selected from a `p` alias joined to `milestones m`.
const PROGRESS_COLUMNS: &str = "p.id, p.sample_id, p.milestone_id, m.name AS milestone_name, \
    p.status, p.due_date, p.completed_at, p.notes, p.created_at, p.updated_at";

/// Provides CRUD for milestone definitions and per-sample progress.
pub struct MilestoneRepo;

impl MilestoneRepo {
    // -----------------------------------------------------------------------
    // Milestone definitions
    // -----------------------------------------------------------------------

    pub async fn create(pool: &PgPool, input: &CreateMilestone) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (name, description, sort_order, default_offset_days)
             VALUES ($1, $2, COALESCE($3, 0), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.default_offset_days)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones ORDER BY sort_order, name");
        sqlx::query_as::<_, Milestone>(&query).fetch_all(pool).await
    }

    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                name = $2, description = $3, sort_order = COALESCE($4, 0),
                default_offset_days = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.default_offset_days)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                sort_order = COALESCE($4, sort_order),
                default_offset_days = COALESCE($5, default_offset_days)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.default_offset_days)
            .fetch_optional(pool)
            .await
    }

    /// Progress rows cascade with the milestone.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Progress
    // -----------------------------------------------------------------------

    /// Progress for one sample in milestone order.
    pub async fn list_progress(
        pool: &PgPool,
        sample_id: DbId,
    ) -> Result<Vec<MilestoneProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS}
             FROM sample_milestone_progress p JOIN milestones m ON m.id = p.milestone_id
             WHERE p.sample_id = $1
             ORDER BY m.sort_order, m.name"
        );
        sqlx::query_as::<_, MilestoneProgress>(&query)
            .bind(sample_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite the progress of one milestone on one sample.
    ///
    /// Marking a milestone `DONE` without a `completed_at` stamps the
    /// current time.
    pub async fn upsert_progress(
        pool: &PgPool,
        sample_id: DbId,
        milestone_id: DbId,
        input: &UpsertProgress,
    ) -> Result<MilestoneProgress, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO sample_milestone_progress
                    (sample_id, milestone_id, status, due_date, completed_at, notes)
                VALUES ($1, $2, COALESCE($3, 'NOT_STARTED'), $4,
                        CASE WHEN $3 = 'DONE' THEN COALESCE($5, NOW()) ELSE $5 END, $6)
                ON CONFLICT ON CONSTRAINT uq_sample_milestone_progress_pair DO UPDATE SET
                    status = EXCLUDED.status,
                    due_date = EXCLUDED.due_date,
                    completed_at = EXCLUDED.completed_at,
                    notes = EXCLUDED.notes
                RETURNING *
             )
             SELECT {PROGRESS_COLUMNS} FROM p JOIN milestones m ON m.id = p.milestone_id"
        );
        sqlx::query_as::<_, MilestoneProgress>(&query)
            .bind(sample_id)
            .bind(milestone_id)
            .bind(&input.status)
            .bind(input.due_date)
            .bind(input.completed_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }
}
