//! Custom request extractors.

mod current_user;
mod path_id;
mod validated_json;
mod validated_query;

pub use current_user::CurrentUser;
pub use path_id::PathId;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
