//! Path identifier extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::domain::ObjectId;
use crate::errors::AppError;

/// The `:id` path segment, parsed as an `ObjectId`.
///
/// Malformed ids are rejected with 422 before any handler logic runs.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(PathId(ObjectId::parse(&raw)?))
    }
}
