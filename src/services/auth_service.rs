//! Authentication service - credential checks and JWT handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::user_service::normalize_email;
use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{ObjectId, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: ObjectId,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// JWT-based AuthService backed by the user repository.
pub struct Authenticator<R: Repositories> {
    repos: Arc<R>,
    config: Config,
}

impl<R: Repositories> Authenticator<R> {
    pub fn new(repos: Arc<R>, config: Config) -> Self {
        Self { repos, config }
    }

    fn issue_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl<R: Repositories> AuthService for Authenticator<R> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self
            .repos
            .users()
            .find_by_email(&normalize_email(&email))
            .await?;

        // Unknown emails still pay for a hash verification
        let stored = user
            .as_ref()
            .map(|u| Password::from_hash(u.password_hash.clone()))
            .unwrap_or_else(Password::unmatchable);
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                self.issue_token(&user)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
