//! Loan validator
//!
//! Field-level checks on a loan request. Every rule runs, and all failures are
//! reported together.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::{LoanApplication, NewLoan};
use crate::error::LoanError;

// ASCII word characters only; `\w` would admit any Unicode letter
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9_\-]+\.[a-z]{2,}$").expect("email pattern compiles")
});

/// Amounts are stored as NUMERIC(15, 2)
const AMOUNT_MAX_SCALE: u32 = 2;

pub const AMOUNT_REQUIRED: &str = "Amount cannot be null or empty";
pub const AMOUNT_TOO_PRECISE: &str = "Amount cannot have more than two decimal places";
pub const TERM_REQUIRED: &str = "Terms in months cannot be null or empty";
pub const TERM_NOT_POSITIVE: &str = "Terms in months must be greater than zero";
pub const EMAIL_REQUIRED: &str = "Email cannot be null";
pub const EMAIL_INVALID: &str = "Email format is invalid";
pub const DOCUMENT_REQUIRED: &str = "Document number cannot be null or empty";

/// Stateless structural validator for loan applications
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanValidator;

impl LoanValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an application, returning the validated loan data or every
    /// error found, in rule order.
    pub fn validate(&self, application: &LoanApplication) -> Result<NewLoan, LoanError> {
        tracing::trace!(?application, "Validating loan application");

        let mut errors = Vec::new();

        match application.amount {
            None => errors.push(AMOUNT_REQUIRED.to_string()),
            Some(amount) if amount.normalize().scale() > AMOUNT_MAX_SCALE => {
                errors.push(AMOUNT_TOO_PRECISE.to_string())
            }
            Some(_) => {}
        }

        match application.term_months {
            None => errors.push(TERM_REQUIRED.to_string()),
            Some(term) if term <= 0 => errors.push(TERM_NOT_POSITIVE.to_string()),
            Some(_) => {}
        }

        match application.email.as_deref() {
            None => errors.push(EMAIL_REQUIRED.to_string()),
            Some(email) if !is_valid_email(email) => errors.push(EMAIL_INVALID.to_string()),
            Some(_) => {}
        }

        let document_number = application
            .document_number
            .as_deref()
            .filter(|d| !d.trim().is_empty());
        if document_number.is_none() {
            errors.push(DOCUMENT_REQUIRED.to_string());
        }

        match (
            application.amount,
            application.term_months,
            application.email.as_ref(),
            document_number,
        ) {
            (Some(amount), Some(term_months), Some(email), Some(document_number))
                if errors.is_empty() =>
            {
                tracing::trace!("Loan application passed validation");
                Ok(NewLoan {
                    amount,
                    term_months,
                    email: email.clone(),
                    document_number: document_number.to_string(),
                    loan_type_id: application.loan_type_id,
                })
            }
            _ => {
                tracing::trace!(?errors, "Loan application failed validation");
                Err(LoanError::Validation(errors))
            }
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
