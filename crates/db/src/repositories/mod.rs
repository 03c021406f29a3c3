//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod bom_repo;
pub mod collection_repo;
pub mod color_repo;
pub mod cost_repo;
pub mod inspection_repo;
pub mod material_repo;
pub mod milestone_repo;
pub mod planning_repo;
pub mod product_repo;
pub mod review_repo;
pub mod sample_repo;
pub mod season_repo;
pub mod size_repo;
pub mod supplier_repo;
pub mod user_repo;

pub use bom_repo::BomRepo;
pub use collection_repo::CollectionRepo;
pub use color_repo::ColorRepo;
pub use cost_repo::CostRepo;
pub use inspection_repo::InspectionRepo;
pub use material_repo::MaterialRepo;
pub use milestone_repo::MilestoneRepo;
pub use planning_repo::{FinancialPlanRepo, OtbPlanRepo};
pub use product_repo::ProductRepo;
pub use review_repo::ReviewRepo;
pub use sample_repo::SampleRepo;
pub use season_repo::SeasonRepo;
pub use size_repo::SizeRepo;
pub use supplier_repo::SupplierRepo;
pub use user_repo::UserRepo;
