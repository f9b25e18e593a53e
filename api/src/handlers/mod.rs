//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod loans;
pub mod response;

pub use loans::{create_loan, list_pending_loans, update_loan_status};
pub use response::ApiResponse;
