//! Furniture database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::user::stored_id;
use crate::domain::Furniture;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "furniture")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub cost: Decimal,
    pub stock: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Furniture {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        Ok(Furniture {
            id: stored_id(&model.id)?,
            name: model.name,
            description: model.description,
            category: model.category,
            cost: model.cost,
            stock: model.stock,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
