use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::links::{resolve_children, Links};
use super::reorder::reorder;
use super::{ServiceError, ServiceResult};
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry};
use crate::models::{Content, CreateTrail, Journey, Stored, Trail, UpdateTrail};

#[derive(Debug, Clone, Serialize)]
pub struct TrailContents {
    pub trail: Stored<Trail>,
    pub contents: Vec<Stored<Content>>,
}

pub struct TrailService {
    trails: Repository<Trail>,
    contents: Repository<Content>,
    links: Links<Trail>,
    journey_links: Links<Journey>,
}

impl TrailService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let trails = Repository::new(store.clone());
        Self {
            links: Links::new(trails.clone()),
            journey_links: Links::new(Repository::new(store.clone())),
            trails,
            contents: Repository::new(store),
        }
    }

    pub async fn create(&self, payload: CreateTrail) -> ServiceResult<Stored<Trail>> {
        let journey_id = payload
            .journey_id
            .ok_or_else(|| ServiceError::Validation("journeyId is required".to_string()))?;

        let trail = self
            .journey_links
            .create_child(journey_id, &self.trails, |order| Trail {
                name: payload.name,
                description: None,
                journey: journey_id,
                contents: Vec::new(),
                order,
            })
            .await?;
        info!("Created trail {} in journey {}", trail.id, journey_id);
        Ok(trail)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<Trail>>> {
        Ok(self.trails.select_all().await?)
    }

    pub async fn find_by_journey(&self, journey_id: Uuid) -> ServiceResult<Vec<Stored<Trail>>> {
        Ok(self.trails.select_where(Trail::journey_filter(journey_id)).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<Trail>> {
        Ok(self.trails.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateTrail) -> ServiceResult<Stored<Trail>> {
        let mut trail = self.trails.select_404(id).await?;
        payload.apply(&mut trail);
        Ok(self.trails.save(&trail).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<Trail>> {
        let trail = self.trails.delete_404(id).await?;
        info!("Deleted trail {}", id);
        Ok(trail)
    }

    pub async fn add_content(&self, id: Uuid, content_id: Uuid) -> ServiceResult<Stored<Trail>> {
        Ok(self.links.attach_child(id, content_id).await?)
    }

    pub async fn remove_content(&self, id: Uuid, content_id: Uuid) -> ServiceResult<Stored<Trail>> {
        Ok(self.links.detach_child(id, content_id).await?)
    }

    pub async fn contents(&self, id: Uuid) -> ServiceResult<TrailContents> {
        let trail = self.trails.select_404(id).await?;
        let contents = resolve_children(&self.contents, &trail.contents).await?;
        Ok(TrailContents { trail, contents })
    }

    pub async fn reconcile(&self, id: Uuid) -> ServiceResult<Stored<Trail>> {
        Ok(self.links.reconcile(id, &self.contents, Content::trail_filter(id)).await?)
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.trails, entries).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryDocumentStore;
    use crate::models::JourneyParent;

    struct Fixture {
        svc: TrailService,
        journey: Stored<Journey>,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let journeys: Repository<Journey> = Repository::new(store.clone());
        let journey = journeys
            .insert(&Journey {
                title: "Fractions".into(),
                description: None,
                parent: JourneyParent::Subject(Uuid::new_v4()),
                trails: vec![],
                order: 1,
            })
            .await
            .unwrap();
        Fixture {
            svc: TrailService::new(store),
            journey,
        }
    }

    fn payload(journey_id: Uuid) -> CreateTrail {
        CreateTrail {
            name: "Basics".into(),
            journey_id: Some(journey_id),
        }
    }

    #[tokio::test]
    async fn create_links_trail_into_journey() {
        let fx = fixture().await;
        let first = fx.svc.create(payload(fx.journey.id)).await.unwrap();
        let second = fx.svc.create(payload(fx.journey.id)).await.unwrap();

        assert_eq!(first.journey, fx.journey.id);
        assert!(first.order < second.order);
        assert_eq!(fx.svc.find_by_journey(fx.journey.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn add_and_remove_content() {
        let fx = fixture().await;
        let trail = fx.svc.create(payload(fx.journey.id)).await.unwrap();
        let content = Uuid::new_v4();

        let trail = fx.svc.add_content(trail.id, content).await.unwrap();
        assert_eq!(trail.contents, vec![content]);

        let trail = fx.svc.remove_content(trail.id, content).await.unwrap();
        assert!(trail.contents.is_empty());

        let trail = fx.svc.remove_content(trail.id, content).await.unwrap();
        assert!(trail.contents.is_empty());
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let fx = fixture().await;
        let trail = fx.svc.create(payload(fx.journey.id)).await.unwrap();

        fx.svc.delete(trail.id).await.unwrap();
        assert!(fx.svc.find_by_id(trail.id).await.is_err());
        assert!(fx.svc.delete(trail.id).await.is_err());
    }
}
