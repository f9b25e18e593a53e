use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "loan_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub loan_type_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub min_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub max_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub interest_rate: Decimal,
    pub auto_validation: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
