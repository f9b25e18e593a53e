//! PostgreSQL adapter for LoanStatusRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::LoanStatus;
use crate::domain::ports::LoanStatusRepository;
use crate::entity::loan_statuses;
use crate::error::DomainError;

pub struct PostgresLoanStatusRepository {
    db: DatabaseConnection,
}

impl PostgresLoanStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoanStatusRepository for PostgresLoanStatusRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<LoanStatus>, DomainError> {
        let result = loan_statuses::Entity::find()
            .filter(loan_statuses::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| LoanStatus {
            id: m.status_id,
            name: m.name,
            description: m.description,
        }))
    }
}
