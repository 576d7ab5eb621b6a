//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ObjectId;
use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::types::SortField;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

/// Lenient conversion used for stored values: unknown roles degrade to `User`.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// Strict conversion used for operator input (case-insensitive).
impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::User),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Postal address owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f7")]
    pub user_id: ObjectId,
    #[schema(example = "Colombia")]
    pub country: String,
    #[schema(example = "Antioquia")]
    pub state: String,
    #[schema(example = "Calle 10 #43-12")]
    pub street: String,
    #[schema(example = "Medellin")]
    pub city: String,
    #[schema(example = "301")]
    pub room_number: String,
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address data for a user being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub country: String,
    pub state: String,
    pub street: String,
    pub city: String,
    pub room_number: String,
}

/// Everything the store needs to persist a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub addresses: Vec<NewAddress>,
}

/// Partial update of the mutable user fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.password_hash.is_none()
    }
}

/// Partial update of a single address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressChanges {
    pub country: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub room_number: Option<String>,
}

impl AddressChanges {
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.state.is_none()
            && self.street.is_none()
            && self.city.is_none()
            && self.room_number.is_none()
    }
}

/// Fields the user listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Name,
    Email,
    CreatedAt,
}

impl SortField for UserSortField {
    const NAMES: &'static [&'static str] = &["name", "email", "created_at"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f7")]
    pub id: ObjectId,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "+57 300 000 0000")]
    pub phone: String,
    pub role: UserRole,
    pub addresses: Vec<Address>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            addresses: user.addresses,
            created_at: user.created_at,
        }
    }
}
