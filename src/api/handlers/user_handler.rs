//! User handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{CurrentUser, PathId, ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::policy::{ADMIN_ONLY, USER_ONLY, USER_OR_ADMIN};
use crate::domain::{Address, AddressChanges, NewAddress, UserResponse, UserSortField};
use crate::errors::AppResult;
use crate::services::{ProfileUpdate, Registration, TokenResponse};
use crate::types::{
    AddressResult, Created, NoContent, PaginationMeta, PaginationParams, ResultBody, TokenResult,
    UserResult,
};

/// Address submitted during sign-up
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressRequest {
    #[validate(length(min = 1, message = "Country is required"))]
    #[schema(example = "Colombia")]
    pub country: String,
    #[validate(length(min = 1, message = "State is required"))]
    #[schema(example = "Antioquia")]
    pub state: String,
    #[validate(length(min = 1, message = "Street is required"))]
    #[schema(example = "Calle 10 #43-12")]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    #[schema(example = "Medellin")]
    pub city: String,
    #[validate(length(min = 1, message = "Room number is required"))]
    #[schema(example = "301")]
    pub room_number: String,
}

impl From<AddressRequest> for NewAddress {
    fn from(req: AddressRequest) -> Self {
        Self {
            country: req.country,
            state: req.state,
            street: req.street,
            city: req.city,
            room_number: req.room_number,
        }
    }
}

/// Sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "+57 300 000 0000")]
    pub phone: String,
    #[validate(length(min = 1, message = "At least one address is required"), nested)]
    pub addresses: Vec<AddressRequest>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Profile update; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Address update; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressRequest {
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "State cannot be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "Street cannot be empty"))]
    pub street: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "Room number cannot be empty"))]
    pub room_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListBody {
    pub users: Vec<UserResponse>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserBody {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedUserBody {
    pub modified_user: UserResponse,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/login", post(login))
        .route("/address/:id", put(update_address))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of users", body = UserListBody),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 422, description = "Invalid pagination or sort field")
    )
)]
pub async fn list_users(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<UserListBody>> {
    current_user.require(ADMIN_ONLY)?;

    let request = params.into_request::<UserSortField>()?;
    let page = state
        .user_service
        .list_users(request)
        .await?
        .map(UserResponse::from);

    Ok(Json(UserListBody {
        users: page.items,
        meta: page.meta,
    }))
}

/// Get user by ID (own profile unless admin)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User profile", body = UserBody),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Malformed id")
    )
)]
pub async fn get_user(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<UserBody>> {
    current_user.require(USER_OR_ADMIN)?;
    current_user.require_owner_or_admin(id)?;

    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserBody { user: user.into() }))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResult),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ResultBody<TokenResponse>>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(ResultBody::new(token)))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResult),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<ResultBody<UserResponse>>> {
    let registration = Registration {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        phone: payload.phone,
        addresses: payload.addresses.into_iter().map(NewAddress::from).collect(),
    };

    let user = state.user_service.create_user(registration).await?;
    Ok(Created(ResultBody::new(user.into())))
}

/// Update one of the caller's addresses
#[utoipa::path(
    put,
    path = "/users/address/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Address ObjectId")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = AddressResult),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the caller's address"),
        (status = 404, description = "Address not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_address(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<UpdateAddressRequest>,
) -> AppResult<Json<ResultBody<Address>>> {
    current_user.require(USER_ONLY)?;

    let changes = AddressChanges {
        country: payload.country,
        state: payload.state,
        street: payload.street,
        city: payload.city,
        room_number: payload.room_number,
    };

    let address = state
        .user_service
        .update_address(current_user.id, id, changes)
        .await?;

    Ok(Json(ResultBody::new(address)))
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ModifiedUserBody),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ModifiedUserBody>> {
    current_user.require(USER_ONLY)?;
    current_user.require_owner(id)?;

    let update = ProfileUpdate {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        password: payload.password,
    };

    let user = state.user_service.update_user(id, update).await?;
    Ok(Json(ModifiedUserBody {
        modified_user: user.into(),
    }))
}

/// Delete a user and their addresses
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Malformed id")
    )
)]
pub async fn delete_user(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<NoContent> {
    current_user.require(USER_OR_ADMIN)?;
    current_user.require_owner_or_admin(id)?;

    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}
