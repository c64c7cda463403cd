pub mod content;
pub mod journey;
pub mod knowledge;
pub mod links;
pub mod reorder;
pub mod start_point;
pub mod subject;
pub mod trail;

pub use content::ContentService;
pub use journey::JourneyService;
pub use knowledge::KnowledgeService;
pub use links::Links;
pub use start_point::StartPointService;
pub use subject::SubjectService;
pub use trail::TrailService;

use tracing::warn;

use crate::clients::AuthClient;
use crate::database::manager::DatabaseError;

/// Domain failures raised by the entity services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Resolve a bearer token through the Auth service.
pub(crate) async fn authenticate(auth: &dyn AuthClient, token: &str) -> ServiceResult<String> {
    match auth.validate_token(token).await {
        Some(user_id) => Ok(user_id),
        None => {
            warn!("Rejected request with an invalid token");
            Err(ServiceError::Unauthorized("Invalid Token!".to_string()))
        }
    }
}
