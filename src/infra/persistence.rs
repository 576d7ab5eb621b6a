//! Repository registry handed to services.
//!
//! Services depend on this trait rather than on concrete stores, so tests can
//! swap in mock repositories while production wires the SeaORM stores.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{FurnitureRepository, FurnitureStore, UserRepository, UserStore};

/// Access to every repository.
pub trait Repositories: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn furniture(&self) -> Arc<dyn FurnitureRepository>;
}

/// SeaORM-backed repositories sharing one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    furniture_repo: Arc<FurnitureStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            furniture_repo: Arc::new(FurnitureStore::new(db)),
        }
    }
}

impl Repositories for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn furniture(&self) -> Arc<dyn FurnitureRepository> {
        self.furniture_repo.clone()
    }
}

/// Repositories assembled from arbitrary implementations (used with mocks).
pub struct RepositorySet {
    pub users: Arc<dyn UserRepository>,
    pub furniture: Arc<dyn FurnitureRepository>,
}

impl Repositories for RepositorySet {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn furniture(&self) -> Arc<dyn FurnitureRepository> {
        self.furniture.clone()
    }
}
