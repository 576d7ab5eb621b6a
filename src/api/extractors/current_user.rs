//! Authenticated caller extracted from the bearer token.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::slice;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{authorize, ObjectId, UserRole};
use crate::errors::{AppError, AppResult};

/// Caller identity taken from a verified JWT.
///
/// Extracting it rejects the request with 401 when the `Authorization`
/// header is missing, malformed or carries an invalid token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Roles the caller may act with
    pub fn capabilities(&self) -> &[UserRole] {
        slice::from_ref(&self.role)
    }

    /// Admit the caller only if one of its capabilities is in `allowed`.
    pub fn require(&self, allowed: &[UserRole]) -> AppResult<()> {
        if authorize(self.capabilities(), allowed).is_allowed() {
            return Ok(());
        }
        tracing::warn!(user_id = %self.id, role = %self.role, "Role not permitted");
        Err(AppError::Forbidden)
    }

    /// Admit the caller only when acting on their own record.
    pub fn require_owner(&self, owner: ObjectId) -> AppResult<()> {
        if self.id == owner {
            return Ok(());
        }
        tracing::warn!(user_id = %self.id, %owner, "Access to another user's record");
        Err(AppError::Forbidden)
    }

    /// Admins may act on any record, everyone else only on their own.
    pub fn require_owner_or_admin(&self, owner: ObjectId) -> AppResult<()> {
        if self.role.is_admin() {
            return Ok(());
        }
        self.require_owner(owner)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth_service.verify_token(token)?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{ADMIN_ONLY, USER_ONLY, USER_OR_ADMIN};

    fn caller(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: ObjectId::new(),
            email: "caller@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn require_maps_deny_to_forbidden() {
        let user = caller(UserRole::User);
        assert!(user.require(USER_OR_ADMIN).is_ok());
        assert!(user.require(USER_ONLY).is_ok());
        assert!(matches!(user.require(ADMIN_ONLY), Err(AppError::Forbidden)));

        let admin = caller(UserRole::Admin);
        assert!(matches!(admin.require(USER_ONLY), Err(AppError::Forbidden)));
    }

    #[test]
    fn ownership_rules() {
        let user = caller(UserRole::User);
        let admin = caller(UserRole::Admin);
        let other = ObjectId::new();

        assert!(user.require_owner_or_admin(user.id).is_ok());
        assert!(user.require_owner_or_admin(other).is_err());
        assert!(admin.require_owner_or_admin(other).is_ok());
        assert!(admin.require_owner(other).is_err());
    }
}
