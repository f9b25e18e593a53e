//! Pagination types for the pending loan listing
//!
//! `PendingLoan` is the projection read from storage; `LoanPageView` is the
//! same row enriched with user data. Neither is ever persisted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

/// Columns the pending loan listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanSortField {
    #[default]
    Email,
    Amount,
    TermMonths,
    LoanType,
    Status,
}

impl std::fmt::Display for LoanSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanSortField::Email => write!(f, "email"),
            LoanSortField::Amount => write!(f, "amount"),
            LoanSortField::TermMonths => write!(f, "termMonths"),
            LoanSortField::LoanType => write!(f, "loanType"),
            LoanSortField::Status => write!(f, "status"),
        }
    }
}

impl std::str::FromStr for LoanSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(LoanSortField::Email),
            "amount" => Ok(LoanSortField::Amount),
            "termmonths" | "term_months" => Ok(LoanSortField::TermMonths),
            "loantype" | "loan_type" => Ok(LoanSortField::LoanType),
            "status" => Ok(LoanSortField::Status),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

/// Parameters of a pending loan page query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub sort_by: LoanSortField,
    /// Status name loans must currently have
    pub filter: String,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A loan row joined with its type and status names
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLoan {
    pub loan_id: Uuid,
    pub amount: Decimal,
    pub term_months: i32,
    pub email: String,
    pub loan_type: String,
    pub interest_rate: Decimal,
    pub status: String,
}

/// A pending loan enriched with applicant data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPageView {
    pub loan_id: Uuid,
    pub amount: Decimal,
    pub term_months: i32,
    pub email: String,
    pub user_name: Option<String>,
    pub loan_type: String,
    pub interest_rate: Decimal,
    pub status: String,
    pub base_salary: Option<i64>,
    pub monthly_amount_requested: Option<Decimal>,
}

impl LoanPageView {
    pub fn new(loan: PendingLoan, user_name: Option<String>, base_salary: Option<i64>) -> Self {
        let monthly_amount_requested = monthly_installment(loan.amount, loan.term_months);
        Self {
            loan_id: loan.loan_id,
            amount: loan.amount,
            term_months: loan.term_months,
            email: loan.email,
            user_name,
            loan_type: loan.loan_type,
            interest_rate: loan.interest_rate,
            status: loan.status,
            base_salary,
            monthly_amount_requested,
        }
    }
}

/// Amount divided by term, rounded half-up to two decimals.
///
/// Returns `None` for a non-positive term.
pub fn monthly_installment(amount: Decimal, term_months: i32) -> Option<Decimal> {
    if term_months <= 0 {
        return None;
    }
    amount
        .checked_div(Decimal::from(term_months))
        .map(|v| v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page_number: u32, page_size: u32, total_elements: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(page_size))
        };
        let page = u64::from(page_number);

        Self {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: page > 0,
        }
    }
}
