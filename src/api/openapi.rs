//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{furniture_handler, user_handler};
use crate::domain::{Address, Furniture, UserResponse, UserRole};
use crate::services::TokenResponse;
use crate::types::{AddressResult, FurnitureResult, PaginationMeta, TokenResult, UserResult};

/// OpenAPI documentation for the Furniture Store API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Furniture Store API",
        version = "0.1.0",
        description = "Users, addresses and a furniture catalogue behind role-based access"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::get_user,
        user_handler::login,
        user_handler::create_user,
        user_handler::update_address,
        user_handler::update_user,
        user_handler::delete_user,
        furniture_handler::list_furniture,
        furniture_handler::get_furniture,
        furniture_handler::create_furniture,
        furniture_handler::update_furniture,
        furniture_handler::delete_furniture,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            Address,
            Furniture,
            PaginationMeta,
            TokenResponse,
            TokenResult,
            UserResult,
            AddressResult,
            FurnitureResult,
            user_handler::AddressRequest,
            user_handler::CreateUserRequest,
            user_handler::LoginRequest,
            user_handler::UpdateUserRequest,
            user_handler::UpdateAddressRequest,
            user_handler::UserListBody,
            user_handler::UserBody,
            user_handler::ModifiedUserBody,
            furniture_handler::CreateFurnitureRequest,
            furniture_handler::UpdateFurnitureRequest,
            furniture_handler::FurnitureListBody,
            furniture_handler::FurnitureBody,
            furniture_handler::ModifiedFurnitureBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Accounts, login and addresses"),
        (name = "Furniture", description = "Furniture catalogue")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /users/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/users",
            "/users/{id}",
            "/users/login",
            "/users/address/{id}",
            "/furniture",
            "/furniture/{id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
