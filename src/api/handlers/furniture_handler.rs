//! Furniture handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{CurrentUser, PathId, ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::policy::ADMIN_ONLY;
use crate::domain::{Furniture, FurnitureChanges, FurnitureSortField, NewFurniture};
use crate::errors::AppResult;
use crate::types::{
    Created, FurnitureResult, NoContent, PaginationMeta, PaginationParams, ResultBody,
};

/// New catalogue entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFurnitureRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Oak dining table")]
    pub name: String,
    #[schema(example = "Seats six")]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Category is required"))]
    #[schema(example = "tables")]
    pub category: String,
    #[schema(value_type = String, example = "499.90")]
    pub cost: Decimal,
    #[schema(example = 12)]
    pub stock: i32,
}

/// Partial furniture update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFurnitureRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Category cannot be empty"))]
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
    pub stock: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FurnitureListBody {
    pub furniture: Vec<Furniture>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FurnitureBody {
    pub furniture: Furniture,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedFurnitureBody {
    pub modified_furniture: Furniture,
}

/// Create furniture routes
pub fn furniture_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_furniture).post(create_furniture))
        .route(
            "/:id",
            get(get_furniture)
                .put(update_furniture)
                .delete(delete_furniture),
        )
}

/// List the catalogue
#[utoipa::path(
    get,
    path = "/furniture",
    tag = "Furniture",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of furniture", body = FurnitureListBody),
        (status = 422, description = "Invalid pagination or sort field")
    )
)]
pub async fn list_furniture(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<FurnitureListBody>> {
    let request = params.into_request::<FurnitureSortField>()?;
    let page = state.furniture_service.list_furniture(request).await?;

    Ok(Json(FurnitureListBody {
        furniture: page.items,
        meta: page.meta,
    }))
}

/// Get one furniture item
#[utoipa::path(
    get,
    path = "/furniture/{id}",
    tag = "Furniture",
    params(("id" = String, Path, description = "Furniture ObjectId")),
    responses(
        (status = 200, description = "Furniture item", body = FurnitureBody),
        (status = 404, description = "Furniture not found"),
        (status = 422, description = "Malformed id")
    )
)]
pub async fn get_furniture(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<FurnitureBody>> {
    let furniture = state.furniture_service.get_furniture(id).await?;
    Ok(Json(FurnitureBody { furniture }))
}

/// Add a catalogue entry (admin only)
#[utoipa::path(
    post,
    path = "/furniture",
    tag = "Furniture",
    security(("bearer_auth" = [])),
    request_body = CreateFurnitureRequest,
    responses(
        (status = 201, description = "Furniture created", body = FurnitureResult),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_furniture(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFurnitureRequest>,
) -> AppResult<Created<ResultBody<Furniture>>> {
    current_user.require(ADMIN_ONLY)?;

    let item = NewFurniture {
        name: payload.name,
        description: payload.description,
        category: payload.category,
        cost: payload.cost,
        stock: payload.stock,
    };

    let created = state.furniture_service.create_furniture(item).await?;
    Ok(Created(ResultBody::new(created)))
}

/// Update a catalogue entry (admin only)
#[utoipa::path(
    put,
    path = "/furniture/{id}",
    tag = "Furniture",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Furniture ObjectId")),
    request_body = UpdateFurnitureRequest,
    responses(
        (status = 200, description = "Furniture updated", body = ModifiedFurnitureBody),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Furniture not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_furniture(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(payload): ValidatedJson<UpdateFurnitureRequest>,
) -> AppResult<Json<ModifiedFurnitureBody>> {
    current_user.require(ADMIN_ONLY)?;

    let changes = FurnitureChanges {
        name: payload.name,
        description: payload.description,
        category: payload.category,
        cost: payload.cost,
        stock: payload.stock,
    };

    let modified_furniture = state.furniture_service.update_furniture(id, changes).await?;
    Ok(Json(ModifiedFurnitureBody { modified_furniture }))
}

/// Remove a catalogue entry (admin only)
#[utoipa::path(
    delete,
    path = "/furniture/{id}",
    tag = "Furniture",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Furniture ObjectId")),
    responses(
        (status = 204, description = "Furniture deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Furniture not found")
    )
)]
pub async fn delete_furniture(
    current_user: CurrentUser,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<NoContent> {
    current_user.require(ADMIN_ONLY)?;

    state.furniture_service.delete_furniture(id).await?;
    Ok(NoContent)
}
