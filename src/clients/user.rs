use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use super::ClientError;

/// Resource kinds the User service tracks per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Knowledges,
    Subjects,
}

impl ResourceKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Knowledges => "knowledges",
            ResourceKind::Subjects => "subjects",
        }
    }
}

#[async_trait]
pub trait UserClient: Send + Sync {
    /// Tell the User service that `resource_id` now belongs to `user_id`.
    async fn add_resource(&self, user_id: &str, kind: ResourceKind, resource_id: Uuid) -> Result<(), ClientError>;
}

pub struct HttpUserClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUserClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn add_url(&self, user_id: &str, kind: ResourceKind, resource_id: Uuid) -> String {
        format!("{}/{}/{}/{}/add", self.base_url, user_id, kind.path_segment(), resource_id)
    }
}

#[async_trait]
impl UserClient for HttpUserClient {
    async fn add_resource(&self, user_id: &str, kind: ResourceKind, resource_id: Uuid) -> Result<(), ClientError> {
        let url = self.add_url(user_id, kind, resource_id);

        let response = self
            .http
            .put(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            error!("User service rejected {}: {}", url, status);
            return Err(ClientError::Status { url, status });
        }

        info!("Added {} {} to user {}", kind.path_segment(), resource_id, user_id);
        Ok(())
    }
}
