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
use crate::models::{CreateSubject, Journey, JourneyParent, Knowledge, Stored, Subject, UpdateSubject};

#[derive(Debug, Clone, Serialize)]
pub struct SubjectJourneys {
    pub subject: Stored<Subject>,
    pub journeys: Vec<Stored<Journey>>,
}

pub struct SubjectService {
    subjects: Repository<Subject>,
    journeys: Repository<Journey>,
    links: Links<Subject>,
    knowledge_links: Links<Knowledge>,
    auth: Arc<dyn AuthClient>,
    users: Arc<dyn UserClient>,
}

impl SubjectService {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthClient>, users: Arc<dyn UserClient>) -> Self {
        let subjects = Repository::new(store.clone());
        Self {
            links: Links::new(subjects.clone()),
            knowledge_links: Links::new(Repository::new(store.clone())),
            subjects,
            journeys: Repository::new(store),
            auth,
            users,
        }
    }

    /// Create a subject owned by the token's user. With a `knowledgeId` the
    /// subject is created as the next child of that Knowledge Area.
    pub async fn create(&self, payload: CreateSubject, token: &str) -> ServiceResult<Stored<Subject>> {
        let user_id = authenticate(self.auth.as_ref(), token).await?;

        let subject = match payload.knowledge_id {
            Some(knowledge_id) => {
                let owner = user_id.clone();
                self.knowledge_links
                    .create_child(knowledge_id, &self.subjects, move |order| {
                        let mut subject = payload.into_subject(owner);
                        subject.order = order;
                        subject
                    })
                    .await?
            }
            None => self.subjects.insert(&payload.into_subject(user_id.clone())).await?,
        };
        info!("Created subject {} for user {}", subject.id, user_id);

        self.users
            .add_resource(&user_id, ResourceKind::Subjects, subject.id)
            .await
            .map_err(|e| {
                error!("Failed to add subject to user: {}", e);
                ServiceError::NotFound("Failed to update user with new subject".to_string())
            })?;

        Ok(subject)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<Subject>>> {
        Ok(self.subjects.select_all().await?)
    }

    pub async fn find_by_user(&self, user_id: &str) -> ServiceResult<Vec<Stored<Subject>>> {
        Ok(self.subjects.select_where(json!({ "user": user_id })).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<Subject>> {
        Ok(self.subjects.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateSubject) -> ServiceResult<Stored<Subject>> {
        let mut subject = self.subjects.select_404(id).await?;
        payload.apply(&mut subject);
        Ok(self.subjects.save(&subject).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<Subject>> {
        let subject = self.subjects.delete_404(id).await?;
        info!("Deleted subject {}", id);
        Ok(subject)
    }

    pub async fn add_journey(&self, id: Uuid, journey_id: Uuid) -> ServiceResult<Stored<Subject>> {
        Ok(self.links.attach_child(id, journey_id).await?)
    }

    pub async fn journeys(&self, id: Uuid) -> ServiceResult<SubjectJourneys> {
        let subject = self.subjects.select_404(id).await?;
        let journeys = resolve_children(&self.journeys, &subject.journeys).await?;
        Ok(SubjectJourneys { subject, journeys })
    }

    /// Attach journeys that name this subject as parent but are missing from
    /// its reference array.
    pub async fn reconcile(&self, id: Uuid) -> ServiceResult<Stored<Subject>> {
        let back_reference = JourneyParent::Subject(id).filter();
        Ok(self.links.reconcile(id, &self.journeys, back_reference).await?)
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.subjects, entries).await?)
    }
}
