//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod loan_service;
pub mod loan_validator;

pub use loan_service::LoanService;
pub use loan_validator::LoanValidator;
