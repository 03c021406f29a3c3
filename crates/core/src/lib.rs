//! Domain logic for the Atelier PLM backend.
//!
//! Everything in this crate is free of network and database I/O so it can
//! be exercised with plain table-driven unit tests.

pub mod care;
pub mod classify;
pub mod costing;
pub mod draft_store;
pub mod error;
pub mod image_color;
pub mod keywords;
pub mod naming;
pub mod pantone;
pub mod planning;
pub mod review_summary;
pub mod roles;
pub mod status;
pub mod types;
