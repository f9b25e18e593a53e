//! Loan service
//!
//! Orchestrates loan applications: validation, applicant and loan type checks,
//! persistence, status transitions with event publication, and the enriched
//! pending loan listing.
//!
//! Every operation is a fail-fast pipeline: the first failing step ends the
//! operation and its error is returned unchanged. No step is retried.

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::LoanValidator;
use crate::domain::entities::{
    Loan, LoanApplication, LoanId, LoanPageView, LoanStatus, NewLoan, Page, PageRequest,
};
use crate::domain::ports::{
    LoanPublisher, LoanRepository, LoanStatusRepository, LoanTypeRepository, UserClient,
    UserProfile,
};
use crate::error::LoanError;

/// Service for loan applications
pub struct LoanService<LR, LTR, LSR, UC, LP>
where
    LR: LoanRepository,
    LTR: LoanTypeRepository,
    LSR: LoanStatusRepository,
    UC: UserClient,
    LP: LoanPublisher,
{
    loans: Arc<LR>,
    loan_types: Arc<LTR>,
    loan_statuses: Arc<LSR>,
    users: Arc<UC>,
    publisher: Arc<LP>,
    validator: LoanValidator,
}

impl<LR, LTR, LSR, UC, LP> LoanService<LR, LTR, LSR, UC, LP>
where
    LR: LoanRepository,
    LTR: LoanTypeRepository,
    LSR: LoanStatusRepository,
    UC: UserClient,
    LP: LoanPublisher,
{
    pub fn new(
        loans: Arc<LR>,
        loan_types: Arc<LTR>,
        loan_statuses: Arc<LSR>,
        users: Arc<UC>,
        publisher: Arc<LP>,
    ) -> Self {
        Self {
            loans,
            loan_types,
            loan_statuses,
            users,
            publisher,
            validator: LoanValidator::new(),
        }
    }

    /// Submit a new loan application
    ///
    /// 1. Field validation
    /// 2. Applicant must be a registered user
    /// 3. Loan type must exist and accept the amount
    /// 4. Persist (assigns id and default status)
    pub async fn create_loan_application(
        &self,
        application: &LoanApplication,
        token: &str,
    ) -> Result<Loan, LoanError> {
        let new_loan = self.validator.validate(application)?;

        self.validate_user(&new_loan, token).await?;
        self.validate_loan(&new_loan).await?;

        let loan = self.loans.create(&new_loan).await?;

        tracing::info!(
            loan_id = %loan.id,
            loan_type_id = loan.loan_type_id,
            "Loan application created"
        );

        Ok(loan)
    }

    /// Check the loan type exists and the amount is within its bounds
    pub async fn validate_loan(&self, loan: &NewLoan) -> Result<(), LoanError> {
        let loan_type = self
            .loan_types
            .find_by_id(loan.loan_type_id)
            .await?
            .ok_or(LoanError::InvalidLoanType(loan.loan_type_id))?;

        if !loan_type.accepts_amount(loan.amount) {
            tracing::warn!(
                amount = %loan.amount,
                loan_type_id = loan_type.id,
                "Amount outside loan type range"
            );
            return Err(LoanError::InvalidAmount {
                amount: loan.amount,
                min: loan_type.min_amount,
                max: loan_type.max_amount,
            });
        }

        Ok(())
    }

    /// Check the applicant is registered with the user service
    pub async fn validate_user(&self, loan: &NewLoan, token: &str) -> Result<(), LoanError> {
        let user = self
            .lookup_user(&loan.email, Some(&loan.document_number), token)
            .await?;

        match user {
            Some(_) => Ok(()),
            None => Err(LoanError::UnregisteredUser {
                email: loan.email.clone(),
                document_number: Some(loan.document_number.clone()),
            }),
        }
    }

    /// List loans currently in the `request.filter` status, enriched with
    /// applicant names and salaries
    pub async fn get_pending_loans(
        &self,
        request: &PageRequest,
        token: &str,
    ) -> Result<Page<LoanPageView>, LoanError> {
        let (loans, total_elements) = tokio::try_join!(
            self.loans.find_pending_loans(request),
            self.loans.count_pending_loans(&request.filter),
        )?;

        let emails: HashSet<String> = loans.iter().map(|l| l.email.clone()).collect();

        let users = if emails.is_empty() {
            Default::default()
        } else {
            tracing::debug!(count = emails.len(), "Resolving applicants");
            self.users.get_users_by_emails(&emails, token).await?
        };

        let content = loans
            .into_iter()
            .map(|loan| {
                let user = users.get(&loan.email);
                LoanPageView::new(
                    loan,
                    user.map(UserProfile::full_name),
                    user.and_then(|u| u.base_salary),
                )
            })
            .collect();

        Ok(Page::new(
            content,
            request.page,
            request.size,
            total_elements,
        ))
    }

    /// Move a loan to the status named `status_name` and publish the change
    pub async fn update_loan_status(
        &self,
        loan_id: &LoanId,
        status_name: &str,
        token: &str,
    ) -> Result<Loan, LoanError> {
        let loan = self
            .loans
            .find_by_id(loan_id)
            .await?
            .ok_or(LoanError::LoanNotFound(loan_id.0))?;

        let status = self.find_status(status_name).await?;

        if loan.is_in_status(status.id) {
            tracing::warn!(loan_id = %loan.id, status = %status.name, "Loan already in status");
            return Err(LoanError::AlreadyInStatus(status_name.to_string()));
        }

        let updated = self.loans.save(&loan.with_status(status.id)).await?;

        let username = self.applicant_name(&updated.email, token).await?;

        self.publisher
            .send_status_update(&updated, status_name, &username)
            .await?;

        tracing::info!(loan_id = %updated.id, status = %status.name, "Loan status updated");

        Ok(updated)
    }

    async fn find_status(&self, status_name: &str) -> Result<LoanStatus, LoanError> {
        self.loan_statuses
            .find_by_name(status_name)
            .await?
            .ok_or_else(|| LoanError::InvalidStatusName(status_name.to_string()))
    }

    async fn applicant_name(&self, email: &str, token: &str) -> Result<String, LoanError> {
        self.lookup_user(email, None, token)
            .await?
            .map(|u| u.full_name())
            .ok_or_else(|| LoanError::UnregisteredUser {
                email: email.to_string(),
                document_number: None,
            })
    }

    /// A failed call (as opposed to an unknown user) means the user service
    /// could not vouch for the applicant
    async fn lookup_user(
        &self,
        email: &str,
        document_number: Option<&str>,
        token: &str,
    ) -> Result<Option<UserProfile>, LoanError> {
        self.users
            .validate_user_registered(email, document_number, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, email, "User service call failed");
                LoanError::AuthenticationServiceUnavailable {
                    email: email.to_string(),
                    document_number: document_number.map(str::to_string),
                }
            })
    }
}
