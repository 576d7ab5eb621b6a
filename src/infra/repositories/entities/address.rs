//! Address database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::user::stored_id;
use crate::domain::Address;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub country: String,
    pub state: String,
    pub street: String,
    pub city: String,
    pub room_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Address {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        Ok(Address {
            id: stored_id(&model.id)?,
            user_id: stored_id(&model.user_id)?,
            country: model.country,
            state: model.state,
            street: model.street,
            city: model.city,
            room_number: model.room_number,
        })
    }
}
