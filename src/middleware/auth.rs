use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::error::ApiError;

/// Raw bearer token from the `Authorization` header. Resolving it to a user
/// is left to the Auth service.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_token(&parts.headers)
            .map(BearerToken)
            .ok_or_else(|| ApiError::unauthorized("Token not found!"))
    }
}

/// The credential is the second word of the header, e.g. `Bearer abc`.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}
