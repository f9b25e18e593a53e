//! Loan status reference data
//!
//! Statuses are rows in a reference table looked up by name; any named status
//! is a valid transition target.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanStatus {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}
