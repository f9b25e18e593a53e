//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Loan, LoanId, LoanStatus, LoanType, NewLoan, PageRequest, PendingLoan};
use crate::error::DomainError;

/// Repository for Loan entities
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Persist a new loan, assigning its id and the default status
    async fn create(&self, loan: &NewLoan) -> Result<Loan, DomainError>;

    /// Persist an existing loan
    async fn save(&self, loan: &Loan) -> Result<Loan, DomainError>;

    /// Find a loan by ID
    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError>;

    /// One page of loans whose status name equals `request.filter`
    async fn find_pending_loans(&self, request: &PageRequest)
        -> Result<Vec<PendingLoan>, DomainError>;

    /// Count loans whose status name equals `status_name`
    async fn count_pending_loans(&self, status_name: &str) -> Result<u64, DomainError>;
}

/// Repository for LoanType reference data
#[async_trait]
pub trait LoanTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<LoanType>, DomainError>;
}

/// Repository for LoanStatus reference data
#[async_trait]
pub trait LoanStatusRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<LoanStatus>, DomainError>;
}
