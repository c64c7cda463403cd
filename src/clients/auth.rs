use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

/// Resolves a bearer token to the id of the user it belongs to.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// `None` for any token that does not resolve to a user id, including
    /// transport failures and non-2xx answers.
    async fn validate_token(&self, token: &str) -> Option<String>;
}

pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateTokenResponse {
    user_payload: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Option<Value>,
}

impl HttpAuthClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn validate_token(&self, token: &str) -> Option<String> {
        let url = format!("{}/validate-token", self.base_url);
        debug!("Validating token against {}", url);

        let response = match self.http.get(&url).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Token validation failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            error!("Token validation failed: auth service responded with {}", response.status());
            return None;
        }

        let body = match response.json::<ValidateTokenResponse>().await {
            Ok(body) => body,
            Err(e) => {
                error!("Token validation failed: unreadable response: {}", e);
                return None;
            }
        };

        body.user_payload.and_then(|payload| user_id(payload.id?))
    }
}

/// Ids arrive as strings or numbers; empty strings count as absent.
fn user_id(value: Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
