//! HTTP request handlers.

pub mod furniture_handler;
pub mod user_handler;

pub use furniture_handler::furniture_routes;
pub use user_handler::user_routes;
