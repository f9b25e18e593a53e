//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Loan, LoanId, LoanSortField, LoanStatus, LoanType, NewLoan, PageRequest, PendingLoan,
    DEFAULT_LOAN_STATUS_ID,
};
use crate::domain::ports::{
    LoanPublisher, LoanRepository, LoanStatusEvent, LoanStatusRepository, LoanTypeRepository,
    UserClient, UserProfile,
};
use crate::error::{DomainError, PublisherError, UserClientError};

// ============================================================================
// In-Memory Loan Repository
// ============================================================================

/// Stores loans by id. Listing rows are configured separately with
/// [`InMemoryLoanRepository::with_pending`] since they carry joined names.
#[derive(Default)]
pub struct InMemoryLoanRepository {
    loans: Arc<RwLock<HashMap<LoanId, Loan>>>,
    pending: Arc<RwLock<Vec<PendingLoan>>>,
    create_calls: Arc<RwLock<usize>>,
    save_calls: Arc<RwLock<usize>>,
    should_fail: bool,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation returns a database error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a loan for testing
    pub fn with_loan(self, loan: Loan) -> Self {
        self.loans.write().unwrap().insert(loan.id, loan);
        self
    }

    /// Pre-populate the listing projection
    pub fn with_pending(self, rows: Vec<PendingLoan>) -> Self {
        self.pending.write().unwrap().extend(rows);
        self
    }

    pub fn get(&self, id: &LoanId) -> Option<Loan> {
        self.loans.read().unwrap().get(id).cloned()
    }

    pub fn create_calls(&self) -> usize {
        *self.create_calls.read().unwrap()
    }

    pub fn save_calls(&self) -> usize {
        *self.save_calls.read().unwrap()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            Err(DomainError::Database("Mock failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn compare_rows(a: &PendingLoan, b: &PendingLoan, sort_by: LoanSortField) -> Ordering {
    let primary = match sort_by {
        LoanSortField::Email => a.email.cmp(&b.email),
        LoanSortField::Amount => a.amount.cmp(&b.amount),
        LoanSortField::TermMonths => a.term_months.cmp(&b.term_months),
        LoanSortField::LoanType => a.loan_type.cmp(&b.loan_type),
        LoanSortField::Status => a.status.cmp(&b.status),
    };
    primary.then_with(|| a.loan_id.cmp(&b.loan_id))
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn create(&self, new_loan: &NewLoan) -> Result<Loan, DomainError> {
        *self.create_calls.write().unwrap() += 1;
        self.check()?;

        let loan = Loan {
            id: LoanId::new(),
            amount: new_loan.amount,
            term_months: new_loan.term_months,
            email: new_loan.email.clone(),
            document_number: new_loan.document_number.clone(),
            loan_type_id: new_loan.loan_type_id,
            loan_status_id: DEFAULT_LOAN_STATUS_ID,
        };

        self.loans.write().unwrap().insert(loan.id, loan.clone());
        Ok(loan)
    }

    async fn save(&self, loan: &Loan) -> Result<Loan, DomainError> {
        *self.save_calls.write().unwrap() += 1;
        self.check()?;

        self.loans.write().unwrap().insert(loan.id, loan.clone());
        Ok(loan.clone())
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn find_pending_loans(
        &self,
        request: &PageRequest,
    ) -> Result<Vec<PendingLoan>, DomainError> {
        self.check()?;

        let mut rows: Vec<PendingLoan> = self
            .pending
            .read()
            .unwrap()
            .iter()
            .filter(|row| row.status == request.filter)
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare_rows(a, b, request.sort_by));

        Ok(rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect())
    }

    async fn count_pending_loans(&self, status_name: &str) -> Result<u64, DomainError> {
        self.check()?;
        let pending = self.pending.read().unwrap();
        Ok(pending.iter().filter(|row| row.status == status_name).count() as u64)
    }
}

// ============================================================================
// In-Memory Reference Data Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryLoanTypeRepository {
    types: Arc<RwLock<HashMap<i32, LoanType>>>,
}

impl InMemoryLoanTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(self, loan_type: LoanType) -> Self {
        self.types.write().unwrap().insert(loan_type.id, loan_type);
        self
    }
}

#[async_trait]
impl LoanTypeRepository for InMemoryLoanTypeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<LoanType>, DomainError> {
        Ok(self.types.read().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLoanStatusRepository {
    statuses: Arc<RwLock<Vec<LoanStatus>>>,
}

impl InMemoryLoanStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, status: LoanStatus) -> Self {
        self.statuses.write().unwrap().push(status);
        self
    }
}

#[async_trait]
impl LoanStatusRepository for InMemoryLoanStatusRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<LoanStatus>, DomainError> {
        let statuses = self.statuses.read().unwrap();
        Ok(statuses.iter().find(|s| s.name == name).cloned())
    }
}

// ============================================================================
// Mock User Client
// ============================================================================

/// (email, document number, token) of a single-user lookup
pub type UserLookup = (String, Option<String>, String);

/// A mock user service that tracks lookups and returns configured users
#[derive(Default)]
pub struct MockUserClient {
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
    validated: Arc<RwLock<Vec<UserLookup>>>,
    batch_requests: Arc<RwLock<Vec<HashSet<String>>>>,
    should_fail: bool,
    circuit_open: bool,
}

impl MockUserClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the service were down
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Every call is rejected as if the circuit breaker were open
    pub fn circuit_open() -> Self {
        Self {
            circuit_open: true,
            ..Self::default()
        }
    }

    pub fn with_user(self, user: UserProfile) -> Self {
        self.users.write().unwrap().insert(user.email.clone(), user);
        self
    }

    pub fn validated(&self) -> Vec<UserLookup> {
        self.validated.read().unwrap().clone()
    }

    pub fn batch_requests(&self) -> Vec<HashSet<String>> {
        self.batch_requests.read().unwrap().clone()
    }

    fn check(&self) -> Result<(), UserClientError> {
        if self.circuit_open {
            Err(UserClientError::CircuitOpen("user-service".to_string()))
        } else if self.should_fail {
            Err(UserClientError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserClient for MockUserClient {
    async fn validate_user_registered(
        &self,
        email: &str,
        document_number: Option<&str>,
        token: &str,
    ) -> Result<Option<UserProfile>, UserClientError> {
        self.validated.write().unwrap().push((
            email.to_string(),
            document_number.map(str::to_string),
            token.to_string(),
        ));
        self.check()?;

        Ok(self.users.read().unwrap().get(email).cloned())
    }

    async fn get_users_by_emails(
        &self,
        emails: &HashSet<String>,
        _token: &str,
    ) -> Result<HashMap<String, UserProfile>, UserClientError> {
        self.batch_requests.write().unwrap().push(emails.clone());
        self.check()?;

        let users = self.users.read().unwrap();
        Ok(emails
            .iter()
            .filter_map(|email| users.get(email).map(|u| (email.clone(), u.clone())))
            .collect())
    }
}

// ============================================================================
// Mock Loan Publisher
// ============================================================================

/// A mock publisher that records every event it is asked to send
#[derive(Default)]
pub struct MockLoanPublisher {
    sent: Arc<RwLock<Vec<LoanStatusEvent>>>,
    should_fail: bool,
}

impl MockLoanPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Events successfully sent
    pub fn sent(&self) -> Vec<LoanStatusEvent> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl LoanPublisher for MockLoanPublisher {
    async fn send_status_update(
        &self,
        loan: &Loan,
        status: &str,
        username: &str,
    ) -> Result<(), PublisherError> {
        if self.should_fail {
            return Err(PublisherError::Send("Mock failure".to_string()));
        }
        self.sent
            .write()
            .unwrap()
            .push(LoanStatusEvent::new(loan, status, username));
        Ok(())
    }
}
