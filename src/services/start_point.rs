use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::links::{resolve_children, Links};
use super::reorder::reorder;
use super::{authenticate, ServiceResult};
use crate::clients::AuthClient;
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry};
use crate::models::{CreateStartPoint, Journey, JourneyParent, StartPoint, Stored, UpdateStartPoint};

#[derive(Debug, Clone, Serialize)]
pub struct StartPointJourneys {
    pub point: Stored<StartPoint>,
    pub journeys: Vec<Stored<Journey>>,
}

pub struct StartPointService {
    points: Repository<StartPoint>,
    journeys: Repository<Journey>,
    links: Links<StartPoint>,
    auth: Arc<dyn AuthClient>,
}

impl StartPointService {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthClient>) -> Self {
        let points = Repository::new(store.clone());
        Self {
            links: Links::new(points.clone()),
            points,
            journeys: Repository::new(store),
            auth,
        }
    }

    /// Start points belong to the token's user; the User service is not told.
    pub async fn create(&self, payload: CreateStartPoint, token: &str) -> ServiceResult<Stored<StartPoint>> {
        let user_id = authenticate(self.auth.as_ref(), token).await?;
        let point = self.points.insert(&payload.into_start_point(user_id)).await?;
        info!("Created start point {}", point.id);
        Ok(point)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<StartPoint>>> {
        Ok(self.points.select_all().await?)
    }

    pub async fn find_by_user(&self, user_id: &str) -> ServiceResult<Vec<Stored<StartPoint>>> {
        Ok(self.points.select_where(json!({ "user": user_id })).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<StartPoint>> {
        Ok(self.points.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateStartPoint) -> ServiceResult<Stored<StartPoint>> {
        let mut point = self.points.select_404(id).await?;
        payload.apply(&mut point);
        Ok(self.points.save(&point).await?)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<StartPoint>> {
        let point = self.points.delete_404(id).await?;
        info!("Deleted start point {}", id);
        Ok(point)
    }

    pub async fn add_journey(&self, id: Uuid, journey_id: Uuid) -> ServiceResult<Stored<StartPoint>> {
        Ok(self.links.attach_child(id, journey_id).await?)
    }

    pub async fn journeys(&self, id: Uuid) -> ServiceResult<StartPointJourneys> {
        let point = self.points.select_404(id).await?;
        let journeys = resolve_children(&self.journeys, &point.journeys).await?;
        Ok(StartPointJourneys { point, journeys })
    }

    pub async fn reconcile(&self, id: Uuid) -> ServiceResult<Stored<StartPoint>> {
        let back_reference = JourneyParent::StartPoint(id).filter();
        Ok(self.links.reconcile(id, &self.journeys, back_reference).await?)
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.points, entries).await?)
    }
}
