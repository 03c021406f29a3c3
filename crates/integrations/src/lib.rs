//! Adapters for third-party services and the jobs built on them.
//!
//! - [`gemini`]: text and vision generation.
//! - [`freepik`]: text-to-image tasks with bounded polling.
//! - [`twitter`]: recent-search for trend research.
//! - [`pantone_match`]: image-to-Pantone matching with a local fallback.
//! - [`review_analysis`]: the batch job that summarises customer reviews.

pub mod error;
pub mod freepik;
pub mod gemini;
pub mod pantone_match;
pub mod review_analysis;
pub mod twitter;

mod http;

pub use error::IntegrationError;
