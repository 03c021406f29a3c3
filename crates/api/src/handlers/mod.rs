pub mod admin;
pub mod auth;
pub mod bom;
pub mod collections;
pub mod colors;
pub mod costs;
pub mod designs;
pub mod materials;
pub mod milestones;
pub mod planning;
pub mod products;
pub mod quality;
pub mod reviews;
pub mod samples;
pub mod seasons;
pub mod sizes;
pub mod suppliers;
pub mod trends;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;

use crate::error::AppError;

/// 404 for a missing row of `entity`.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}
