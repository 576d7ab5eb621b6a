//! Service Container - Centralized service access.
//!
//! Handlers and commands depend on the service traits exposed here,
//! never on the concrete implementations.

use std::sync::Arc;

use super::{AuthService, FurnitureService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn furniture(&self) -> Arc<dyn FurnitureService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    furniture_service: Arc<dyn FurnitureService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        furniture_service: Arc<dyn FurnitureService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            furniture_service,
        }
    }

    /// Wire every service on top of a single database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, FurnitureCatalog, UserManager};

        let repos = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(repos.clone(), config)),
            user_service: Arc::new(UserManager::new(repos.clone())),
            furniture_service: Arc::new(FurnitureCatalog::new(repos)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn furniture(&self) -> Arc<dyn FurnitureService> {
        self.furniture_service.clone()
    }
}
