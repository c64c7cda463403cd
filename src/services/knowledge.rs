use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use super::links::{resolve_children, Links};
use super::reorder::reorder;
use super::{authenticate, ServiceError, ServiceResult};
use crate::clients::{AuthClient, ResourceKind, UserClient};
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry};
use crate::models::{CreateKnowledge, Knowledge, Stored, Subject, UpdateKnowledge};

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeSubjects {
    pub knowledge: Stored<Knowledge>,
    pub subjects: Vec<Stored<Subject>>,
}

pub struct KnowledgeService {
    knowledges: Repository<Knowledge>,
    subjects: Repository<Subject>,
    links: Links<Knowledge>,
    auth: Arc<dyn AuthClient>,
    users: Arc<dyn UserClient>,
}

impl KnowledgeService {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthClient>, users: Arc<dyn UserClient>) -> Self {
        let knowledges = Repository::new(store.clone());
        Self {
            links: Links::new(knowledges.clone()),
            knowledges,
            subjects: Repository::new(store),
            auth,
            users,
        }
    }

    /// Create a Knowledge Area owned by the token's user and register it with
    /// the User service.
    pub async fn create(&self, payload: CreateKnowledge, token: &str) -> ServiceResult<Stored<Knowledge>> {
        let user_id = authenticate(self.auth.as_ref(), token).await?;
        let knowledge = self.knowledges.insert(&payload.into_knowledge(user_id.clone())).await?;
        info!("Created knowledge area {} for user {}", knowledge.id, user_id);

        self.users
            .add_resource(&user_id, ResourceKind::Knowledges, knowledge.id)
            .await
            .map_err(|e| {
                error!("Failed to add knowledge area to user: {}", e);
                ServiceError::NotFound("Failed to update user with new knowledge".to_string())
            })?;

        Ok(knowledge)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<Knowledge>>> {
        Ok(self.knowledges.select_all().await?)
    }

    pub async fn find_by_user(&self, user_id: &str) -> ServiceResult<Vec<Stored<Knowledge>>> {
        Ok(self.knowledges.select_where(json!({ "user": user_id })).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<Knowledge>> {
        Ok(self.knowledges.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateKnowledge) -> ServiceResult<Stored<Knowledge>> {
        let mut knowledge = self.knowledges.select_404(id).await?;
        payload.apply(&mut knowledge);
        Ok(self.knowledges.save(&knowledge).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<Knowledge>> {
        let knowledge = self.knowledges.delete_404(id).await?;
        info!("Deleted knowledge area {}", id);
        Ok(knowledge)
    }

    pub async fn add_subject(&self, id: Uuid, subject_id: Uuid) -> ServiceResult<Stored<Knowledge>> {
        Ok(self.links.attach_child(id, subject_id).await?)
    }

    pub async fn subjects(&self, id: Uuid) -> ServiceResult<KnowledgeSubjects> {
        let knowledge = self.knowledges.select_404(id).await?;
        let subjects = resolve_children(&self.subjects, &knowledge.subjects).await?;
        Ok(KnowledgeSubjects { knowledge, subjects })
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.knowledges, entries).await?)
    }
}
