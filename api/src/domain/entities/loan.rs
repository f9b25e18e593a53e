//! Loan domain entity
//!
//! A loan application submitted by a registered user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to every new loan (the seeded "Pending Review" row)
pub const DEFAULT_LOAN_STATUS_ID: i32 = 1;

/// Loan type used when a request does not name one
pub const DEFAULT_LOAN_TYPE_ID: i32 = 1;

/// Unique identifier for a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(pub Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LoanId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted loan
///
/// Amount and term are fixed at creation; the status id is the only field that
/// changes afterwards, via [`Loan::with_status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loan {
    pub id: LoanId,
    pub amount: Decimal,
    pub term_months: i32,
    pub email: String,
    pub document_number: String,
    pub loan_type_id: i32,
    pub loan_status_id: i32,
}

impl Loan {
    /// Copy of this loan moved to another status
    pub fn with_status(self, loan_status_id: i32) -> Self {
        Self {
            loan_status_id,
            ..self
        }
    }

    pub fn is_in_status(&self, loan_status_id: i32) -> bool {
        self.loan_status_id == loan_status_id
    }
}

/// An unvalidated loan request as received from a client
#[derive(Debug, Clone, Default)]
pub struct LoanApplication {
    pub amount: Option<Decimal>,
    pub term_months: Option<i32>,
    pub email: Option<String>,
    pub document_number: Option<String>,
    pub loan_type_id: i32,
}

/// Data needed to create a new loan (validated)
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub amount: Decimal,
    pub term_months: i32,
    pub email: String,
    pub document_number: String,
    pub loan_type_id: i32,
}
