//! Response helpers shared by handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Address, Furniture, UserResponse};
use crate::services::TokenResponse;

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// No content response helper for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// `{"result": ...}` envelope used by create, login and address updates
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    TokenResult = ResultBody<TokenResponse>,
    UserResult = ResultBody<UserResponse>,
    AddressResult = ResultBody<Address>,
    FurnitureResult = ResultBody<Furniture>
)]
pub struct ResultBody<T: Serialize> {
    pub result: T,
}

impl<T: Serialize> ResultBody<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}
