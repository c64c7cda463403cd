use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::links::{resolve_children, Links};
use super::reorder::reorder;
use super::{ServiceError, ServiceResult};
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry};
use crate::models::{CreateJourney, Journey, JourneyParent, StartPoint, Stored, Subject, Trail, UpdateJourney};

#[derive(Debug, Clone, Serialize)]
pub struct JourneyTrails {
    pub journey: Stored<Journey>,
    pub trails: Vec<Stored<Trail>>,
}

pub struct JourneyService {
    journeys: Repository<Journey>,
    trails: Repository<Trail>,
    links: Links<Journey>,
    subject_links: Links<Subject>,
    point_links: Links<StartPoint>,
}

impl JourneyService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let journeys = Repository::new(store.clone());
        Self {
            links: Links::new(journeys.clone()),
            subject_links: Links::new(Repository::new(store.clone())),
            point_links: Links::new(Repository::new(store.clone())),
            journeys,
            trails: Repository::new(store),
        }
    }

    /// Create a journey as the next child of its subject or start point.
    pub async fn create(&self, payload: CreateJourney) -> ServiceResult<Stored<Journey>> {
        let parent = payload
            .parent()
            .ok_or_else(|| ServiceError::Validation("Exactly one of subjectId or pointId is required".to_string()))?;

        let build = move |order| payload.into_journey(parent, order);
        let journey = match parent {
            JourneyParent::Subject(id) => self.subject_links.create_child(id, &self.journeys, build).await?,
            JourneyParent::StartPoint(id) => self.point_links.create_child(id, &self.journeys, build).await?,
        };
        info!("Created journey {} under {:?}", journey.id, parent);
        Ok(journey)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<Journey>>> {
        Ok(self.journeys.select_all().await?)
    }

    pub async fn find_by_parent(&self, parent: JourneyParent) -> ServiceResult<Vec<Stored<Journey>>> {
        Ok(self.journeys.select_where(parent.filter()).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<Journey>> {
        Ok(self.journeys.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJourney) -> ServiceResult<Stored<Journey>> {
        let mut journey = self.journeys.select_404(id).await?;
        payload.apply(&mut journey);
        Ok(self.journeys.save(&journey).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<Journey>> {
        let journey = self.journeys.delete_404(id).await?;
        info!("Deleted journey {}", id);
        Ok(journey)
    }

    pub async fn add_trail(&self, id: Uuid, trail_id: Uuid) -> ServiceResult<Stored<Journey>> {
        Ok(self.links.attach_child(id, trail_id).await?)
    }

    pub async fn trails(&self, id: Uuid) -> ServiceResult<JourneyTrails> {
        let journey = self.journeys.select_404(id).await?;
        let trails = resolve_children(&self.trails, &journey.trails).await?;
        Ok(JourneyTrails { journey, trails })
    }

    pub async fn reconcile(&self, id: Uuid) -> ServiceResult<Stored<Journey>> {
        Ok(self.links.reconcile(id, &self.trails, Trail::journey_filter(id)).await?)
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.journeys, entries).await?)
    }
}
