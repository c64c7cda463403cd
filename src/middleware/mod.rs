pub mod auth;
pub mod json;
pub mod path;
pub mod response;

pub use auth::BearerToken;
pub use json::ValidJson;
pub use path::parse_id;
pub use response::{ApiResponse, ApiResult};
