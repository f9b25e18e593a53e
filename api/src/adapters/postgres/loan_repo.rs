//! PostgreSQL adapter for LoanRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, Set, Statement,
};
use uuid::Uuid;

use crate::domain::entities::{
    Loan, LoanId, LoanSortField, NewLoan, PageRequest, PendingLoan, DEFAULT_LOAN_STATUS_ID,
};
use crate::domain::ports::LoanRepository;
use crate::entity::loan_application;
use crate::error::DomainError;

const PENDING_LOANS_SQL: &str = r#"
SELECT la.loan_id,
       la.amount,
       la.term_months,
       la.email,
       lt.name AS loan_type,
       lt.interest_rate,
       ls.name AS status
FROM loan_application la
INNER JOIN loan_types lt ON la.loan_type_id = lt.loan_type_id
INNER JOIN loan_statuses ls ON la.status_id = ls.status_id
WHERE ls.name = $1
"#;

const COUNT_PENDING_LOANS_SQL: &str = r#"
SELECT COUNT(*) AS total
FROM loan_application la
INNER JOIN loan_statuses ls ON la.status_id = ls.status_id
WHERE ls.name = $1
"#;

/// Row shape of the pending loan listing query
#[derive(Debug, FromQueryResult)]
struct PendingLoanRow {
    loan_id: Uuid,
    amount: Decimal,
    term_months: i32,
    email: String,
    loan_type: String,
    interest_rate: Decimal,
    status: String,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

/// ORDER BY expression for a sort field. Only these fixed strings ever reach
/// the SQL text; loan_id keeps page boundaries stable across equal keys.
fn order_by(field: LoanSortField) -> &'static str {
    match field {
        LoanSortField::Email => "la.email, la.loan_id",
        LoanSortField::Amount => "la.amount, la.loan_id",
        LoanSortField::TermMonths => "la.term_months, la.loan_id",
        LoanSortField::LoanType => "lt.name, la.loan_id",
        LoanSortField::Status => "ls.name, la.loan_id",
    }
}

/// PostgreSQL implementation of LoanRepository
pub struct PostgresLoanRepository {
    db: DatabaseConnection,
}

impl PostgresLoanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoanRepository for PostgresLoanRepository {
    async fn create(&self, loan: &NewLoan) -> Result<Loan, DomainError> {
        let model = loan_application::ActiveModel {
            loan_id: Set(Uuid::new_v4()),
            amount: Set(loan.amount),
            term_months: Set(loan.term_months),
            document_number: Set(loan.document_number.clone()),
            email: Set(loan.email.clone()),
            loan_type_id: Set(loan.loan_type_id),
            status_id: Set(DEFAULT_LOAN_STATUS_ID),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn save(&self, loan: &Loan) -> Result<Loan, DomainError> {
        let model = loan_application::ActiveModel {
            loan_id: Set(loan.id.0),
            amount: Set(loan.amount),
            term_months: Set(loan.term_months),
            document_number: Set(loan.document_number.clone()),
            email: Set(loan.email.clone()),
            loan_type_id: Set(loan.loan_type_id),
            status_id: Set(loan.loan_status_id),
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError> {
        let result = loan_application::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_pending_loans(
        &self,
        request: &PageRequest,
    ) -> Result<Vec<PendingLoan>, DomainError> {
        let sql = format!(
            "{} ORDER BY {} LIMIT $2 OFFSET $3",
            PENDING_LOANS_SQL.trim_end(),
            order_by(request.sort_by)
        );
        let offset = i64::try_from(request.offset())
            .map_err(|_| DomainError::Internal("Page offset out of range".to_string()))?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                request.filter.clone().into(),
                i64::from(request.size).into(),
                offset.into(),
            ],
        );

        let rows = PendingLoanRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count_pending_loans(&self, status_name: &str) -> Result<u64, DomainError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            COUNT_PENDING_LOANS_SQL,
            [status_name.into()],
        );

        let row = CountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(row.map(|r| r.total.max(0) as u64).unwrap_or(0))
    }
}

/// Convert SeaORM model to domain entity
impl From<loan_application::Model> for Loan {
    fn from(model: loan_application::Model) -> Self {
        Loan {
            id: LoanId(model.loan_id),
            amount: model.amount,
            term_months: model.term_months,
            email: model.email,
            document_number: model.document_number,
            loan_type_id: model.loan_type_id,
            loan_status_id: model.status_id,
        }
    }
}

impl From<PendingLoanRow> for PendingLoan {
    fn from(row: PendingLoanRow) -> Self {
        PendingLoan {
            loan_id: row.loan_id,
            amount: row.amount,
            term_months: row.term_months,
            email: row.email,
            loan_type: row.loan_type,
            interest_rate: row.interest_rate,
            status: row.status,
        }
    }
}
