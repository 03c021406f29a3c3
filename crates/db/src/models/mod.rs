//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (also used for full `PUT` updates)
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod bom;
pub mod collection;
pub mod color;
pub mod cost;
pub mod inspection;
pub mod material;
pub mod milestone;
pub mod planning;
pub mod product;
pub mod review;
pub mod sample;
pub mod season;
pub mod size;
pub mod supplier;
pub mod user;
