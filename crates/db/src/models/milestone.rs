//! Milestone definitions and per-sample progress.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    /// Days after the sample request date the milestone is normally due.
    pub default_offset_days: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMilestone {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub default_offset_days: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMilestone {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub default_offset_days: Option<i32>,
}

/// A `sample_milestone_progress` row joined with the milestone name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MilestoneProgress {
    pub id: DbId,
    pub sample_id: DbId,
    pub milestone_id: DbId,
    pub milestone_name: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `PUT /samples/{id}/progress/{milestone_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProgress {
    /// Defaults to `NOT_STARTED`.
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
}
