//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod loan_repo;
pub mod loan_status_repo;
pub mod loan_type_repo;


pub use loan_repo::PostgresLoanRepository;
pub use loan_status_repo::PostgresLoanStatusRepository;
pub use loan_type_repo::PostgresLoanTypeRepository;
