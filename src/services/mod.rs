//! Application services layer - Use cases and business logic.
//!
//! Services depend on the `Repositories` abstraction so they can be
//! exercised against mocked stores.

mod auth_service;
pub mod container;
mod furniture_service;
mod user_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use furniture_service::{FurnitureCatalog, FurnitureService};
pub use user_service::{ProfileUpdate, Registration, UserManager, UserService};
