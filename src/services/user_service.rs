//! User service - Handles user-related business logic.
//!
//! Owns the rules around accounts: unique emails, password hashing,
//! address ownership and role assignment.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Address, AddressChanges, NewAddress, NewUser, ObjectId, Password, User, UserChanges, UserRole,
    UserSortField,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Repositories;
use crate::types::{Page, PageRequest};

/// Sign-up data, password still in plain text
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub addresses: Vec<NewAddress>,
}

/// Profile changes requested by a user
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Emails are compared trimmed and lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: ObjectId) -> AppResult<User>;

    /// One page of users, optionally sorted
    async fn list_users(&self, request: PageRequest<UserSortField>) -> AppResult<Page<User>>;

    /// Register a new account; the role is always `USER`
    async fn create_user(&self, registration: Registration) -> AppResult<User>;

    async fn update_user(&self, id: ObjectId, update: ProfileUpdate) -> AppResult<User>;

    /// Update an address that must belong to `owner`
    async fn update_address(
        &self,
        owner: ObjectId,
        address_id: ObjectId,
        changes: AddressChanges,
    ) -> AppResult<Address>;

    /// Delete a user together with their addresses
    async fn delete_user(&self, id: ObjectId) -> AppResult<()>;

    /// Change the role of the account registered under `email`
    async fn assign_role(&self, email: &str, role: UserRole) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> UserManager<R> {
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }

    /// Fail with a conflict when `email` belongs to someone other than `owner`.
    async fn ensure_email_free(&self, email: &str, owner: Option<ObjectId>) -> AppResult<()> {
        match self.repos.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("Email")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Repositories> UserService for UserManager<R> {
    async fn get_user(&self, id: ObjectId) -> AppResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("User", id)
    }

    async fn list_users(&self, request: PageRequest<UserSortField>) -> AppResult<Page<User>> {
        self.repos.users().list(request).await
    }

    async fn create_user(&self, registration: Registration) -> AppResult<User> {
        if registration.addresses.is_empty() {
            return Err(AppError::validation("At least one address is required"));
        }

        let email = normalize_email(&registration.email);
        self.ensure_email_free(&email, None).await?;

        let password = Password::new(&registration.password)?;
        let new_user = NewUser {
            name: registration.name,
            email,
            password_hash: password.into_string(),
            phone: registration.phone,
            role: UserRole::User,
            addresses: registration.addresses,
        };

        let user = self.repos.users().create(new_user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn update_user(&self, id: ObjectId, update: ProfileUpdate) -> AppResult<User> {
        let email = update.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let password_hash = match update.password.as_deref() {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        let changes = UserChanges {
            name: update.name,
            email,
            phone: update.phone,
            password_hash,
        };
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let user = self.repos.users().update(id, changes).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn update_address(
        &self,
        owner: ObjectId,
        address_id: ObjectId,
        changes: AddressChanges,
    ) -> AppResult<Address> {
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let address = self
            .repos
            .users()
            .find_address(address_id)
            .await?
            .ok_or_not_found("Address", address_id)?;

        if address.user_id != owner {
            tracing::warn!(%owner, %address_id, "Address update on foreign address");
            return Err(AppError::Forbidden);
        }

        self.repos.users().update_address(address_id, changes).await
    }

    async fn delete_user(&self, id: ObjectId) -> AppResult<()> {
        self.repos.users().delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn assign_role(&self, email: &str, role: UserRole) -> AppResult<User> {
        let users = self.repos.users();
        let user = users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::NotFound)?;

        let user = users.set_role(user.id, role).await?;
        tracing::info!(user_id = %user.id, %role, "Role assigned");
        Ok(user)
    }
}
