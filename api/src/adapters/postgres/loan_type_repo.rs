//! PostgreSQL adapter for LoanTypeRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::entities::LoanType;
use crate::domain::ports::LoanTypeRepository;
use crate::entity::loan_types;
use crate::error::DomainError;

pub struct PostgresLoanTypeRepository {
    db: DatabaseConnection,
}

impl PostgresLoanTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LoanTypeRepository for PostgresLoanTypeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<LoanType>, DomainError> {
        let result = loan_types::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

impl From<loan_types::Model> for LoanType {
    fn from(model: loan_types::Model) -> Self {
        LoanType {
            id: model.loan_type_id,
            name: model.name,
            description: model.description,
            min_amount: model.min_amount,
            max_amount: model.max_amount,
            interest_rate: model.interest_rate,
            auto_validation: model.auto_validation,
        }
    }
}
