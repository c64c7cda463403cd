use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::links::Links;
use super::reorder::reorder;
use super::{ServiceError, ServiceResult};
use crate::database::manager::DatabaseError;
use crate::database::repository::Repository;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry};
use crate::models::{Content, CreateContent, Stored, Trail, UpdateContent};

pub struct ContentService {
    contents: Repository<Content>,
    trail_links: Links<Trail>,
}

impl ContentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            contents: Repository::new(store.clone()),
            trail_links: Links::new(Repository::new(store)),
        }
    }

    pub async fn create(&self, payload: CreateContent) -> ServiceResult<Stored<Content>> {
        let trail_id = payload
            .trail_id
            .ok_or_else(|| ServiceError::Validation("trailId is required".to_string()))?;

        let content = self
            .trail_links
            .create_child(trail_id, &self.contents, |order| Content {
                title: payload.title,
                content: payload.content,
                trail: trail_id,
                order,
            })
            .await?;
        info!("Created content {} in trail {}", content.id, trail_id);
        Ok(content)
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Stored<Content>>> {
        Ok(self.contents.select_all().await?)
    }

    pub async fn find_by_trail(&self, trail_id: Uuid) -> ServiceResult<Vec<Stored<Content>>> {
        Ok(self.contents.select_where(Content::trail_filter(trail_id)).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Stored<Content>> {
        Ok(self.contents.select_404(id).await?)
    }

    /// Partial update. A new `trailId` moves the content: the target trail
    /// must exist and gains the reference before the old trail loses it.
    pub async fn update(&self, id: Uuid, payload: UpdateContent) -> ServiceResult<Stored<Content>> {
        let mut content = self.contents.select_404(id).await?;
        let previous = content.trail;
        let target = payload.trail_id.filter(|trail| *trail != previous);

        if let Some(target) = target {
            self.trail_links.attach_child(target, id).await?;
        }

        payload.apply(&mut content);
        let content = self.contents.save(&content).await?;

        if let Some(target) = target {
            match self.trail_links.detach_child(previous, id).await {
                Ok(_) => {}
                Err(DatabaseError::NotFound(_)) => warn!("Previous trail {} of content {} no longer exists", previous, id),
                Err(e) => return Err(e.into()),
            }
            info!("Moved content {} from trail {} to {}", id, previous, target);
        }

        Ok(content)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<Stored<Content>> {
        let content = self.contents.delete_404(id).await?;
        info!("Deleted content {}", id);
        Ok(content)
    }

    pub async fn update_order(&self, entries: &[OrderEntry]) -> ServiceResult<BulkWriteSummary> {
        Ok(reorder(&self.contents, entries).await?)
    }
}
