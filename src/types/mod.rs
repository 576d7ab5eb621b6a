//! Shared types used across handlers, services and repositories.

mod pagination;
mod response;

pub use pagination::{
    Page, PageRequest, PaginationMeta, PaginationParams, Sort, SortField, SortOrder,
};
pub use response::{
    AddressResult, Created, FurnitureResult, NoContent, ResultBody, TokenResult, UserResult,
};
