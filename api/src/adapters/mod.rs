//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod sqs;
pub mod users;

pub use postgres::{
    PostgresLoanRepository, PostgresLoanStatusRepository, PostgresLoanTypeRepository,
};
pub use sqs::SqsLoanPublisher;
pub use users::{CircuitBreaker, CircuitBreakerConfig, RestUserClient};
