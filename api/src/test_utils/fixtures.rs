//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{
    Loan, LoanApplication, LoanId, LoanStatus, LoanType, PendingLoan, DEFAULT_LOAN_TYPE_ID,
};
use crate::domain::ports::UserProfile;

/// A complete, valid loan application for `email`
pub fn test_application(email: &str) -> LoanApplication {
    LoanApplication {
        amount: Some(Decimal::from(5000)),
        term_months: Some(12),
        email: Some(email.to_string()),
        document_number: Some("1032456789".to_string()),
        loan_type_id: DEFAULT_LOAN_TYPE_ID,
    }
}

/// A stored loan for `email` in the given status
pub fn test_loan(email: &str, loan_status_id: i32) -> Loan {
    Loan {
        id: LoanId(Uuid::new_v4()),
        amount: Decimal::from(5000),
        term_months: 12,
        email: email.to_string(),
        document_number: "1032456789".to_string(),
        loan_type_id: DEFAULT_LOAN_TYPE_ID,
        loan_status_id,
    }
}

/// A registered user named Ana Gomez
pub fn test_user(email: &str) -> UserProfile {
    test_user_named(email, "Ana", "Gomez")
}

pub fn test_user_named(email: &str, name: &str, lastname: &str) -> UserProfile {
    UserProfile {
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        lastname: lastname.to_string(),
        birth_date: None,
        address: Some("Calle 10 # 4-20".to_string()),
        phone: Some("3001234567".to_string()),
        email: email.to_string(),
        base_salary: Some(4_200_000),
    }
}

/// Loan type 1: amounts from 1000 to 10000
pub fn personal_loan_type() -> LoanType {
    LoanType {
        id: DEFAULT_LOAN_TYPE_ID,
        name: "Personal".to_string(),
        description: Some("Unsecured personal loan".to_string()),
        min_amount: Decimal::from(1000),
        max_amount: Decimal::from(10000),
        interest_rate: Decimal::new(125, 1),
        auto_validation: false,
    }
}

pub fn pending_status() -> LoanStatus {
    LoanStatus {
        id: 1,
        name: "Pending Review".to_string(),
        description: Some("Waiting for an advisor".to_string()),
    }
}

pub fn approved_status() -> LoanStatus {
    LoanStatus {
        id: 2,
        name: "Approved".to_string(),
        description: None,
    }
}

pub fn rejected_status() -> LoanStatus {
    LoanStatus {
        id: 3,
        name: "Rejected".to_string(),
        description: None,
    }
}

/// A listing row for a personal loan awaiting review
pub fn pending_loan_row(email: &str, amount: i64, term_months: i32) -> PendingLoan {
    PendingLoan {
        loan_id: Uuid::new_v4(),
        amount: Decimal::from(amount),
        term_months,
        email: email.to_string(),
        loan_type: "Personal".to_string(),
        interest_rate: Decimal::new(125, 1),
        status: "Pending Review".to_string(),
    }
}
