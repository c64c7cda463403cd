//! HTTP clients for the two external collaborators: the Auth service, which
//! resolves bearer tokens to user ids, and the User service, which is told
//! when a resource is created for a user.

pub mod auth;
pub mod user;

pub use auth::{AuthClient, HttpAuthClient};
pub use user::{HttpUserClient, ResourceKind, UserClient};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status { url: String, status: reqwest::StatusCode },
}

/// Shared reqwest client for both collaborators. No retry or timeout policy
/// beyond reqwest's defaults.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}
