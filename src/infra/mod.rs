//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, SeaORM entities and repositories.

pub mod db;
pub mod persistence;
pub mod repositories;

pub use db::{Database, Migrator};
pub use persistence::{Persistence, Repositories, RepositorySet};
pub use repositories::{FurnitureRepository, FurnitureStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockFurnitureRepository, MockUserRepository};
