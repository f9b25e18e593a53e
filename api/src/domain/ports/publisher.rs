//! Loan event publisher port trait

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Loan;
use crate::error::PublisherError;

/// Message emitted when a loan changes status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatusEvent {
    pub loan_id: Uuid,
    pub username: String,
    pub email: String,
    pub status: String,
}

impl LoanStatusEvent {
    pub fn new(loan: &Loan, status: &str, username: &str) -> Self {
        Self {
            loan_id: loan.id.0,
            username: username.to_string(),
            email: loan.email.clone(),
            status: status.to_string(),
        }
    }
}

#[async_trait]
pub trait LoanPublisher: Send + Sync {
    async fn send_status_update(
        &self,
        loan: &Loan,
        status: &str,
        username: &str,
    ) -> Result<(), PublisherError>;
}
