//! API layer - HTTP handlers, extractors and routes.
//!
//! Authentication and role checks happen in the `CurrentUser` extractor
//! and the handlers themselves; there is no separate middleware stack.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
