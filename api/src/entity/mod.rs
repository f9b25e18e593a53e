//! SeaORM entities
//!
//! Table mappings for the loan schema in `migrations/`. Domain code never uses
//! these directly; adapters convert them into `domain::entities` types.

pub mod loan_application;
pub mod loan_statuses;
pub mod loan_types;
