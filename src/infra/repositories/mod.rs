//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod furniture_repository;
mod user_repository;

use sea_orm::{DbErr, Order, SqlErr};

use crate::errors::AppError;
use crate::types::SortOrder;

pub use furniture_repository::{FurnitureRepository, FurnitureStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use furniture_repository::MockFurnitureRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

fn sea_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Turn unique-constraint violations into a conflict on `entity`.
fn conflict_on_duplicate(err: DbErr, entity: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
        _ => AppError::from(err),
    }
}
