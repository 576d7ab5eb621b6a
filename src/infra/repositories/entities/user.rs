//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Address, ObjectId, User, UserRole};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::address::Entity")]
    Addresses,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine a row with its address rows into the domain entity.
    pub fn into_domain(self, addresses: Vec<super::address::Model>) -> AppResult<User> {
        Ok(User {
            id: stored_id(&self.id)?,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role: UserRole::from(self.role.as_str()),
            addresses: addresses
                .into_iter()
                .map(Address::try_from)
                .collect::<AppResult<_>>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Parse an id column. Ids are always written from an `ObjectId`, so a
/// malformed one is a data corruption error rather than bad input.
pub(crate) fn stored_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse(raw).map_err(|e| AppError::internal(format!("Corrupt id in database: {}", e)))
}
