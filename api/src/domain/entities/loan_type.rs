//! Loan type reference data

use rust_decimal::Decimal;
use serde::Serialize;

/// A kind of loan with its allowed amount range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub interest_rate: Decimal,
    pub auto_validation: bool,
}

impl LoanType {
    /// Bounds are inclusive on both ends
    pub fn accepts_amount(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }
}
