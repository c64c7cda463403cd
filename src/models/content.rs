use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::validate::{Validate, ValidationErrors};
use super::Document;
use crate::database::collection::Collection;

/// Leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub title: String,
    pub content: String,
    pub trail: Uuid,
    #[serde(default)]
    pub order: i64,
}

impl Content {
    pub fn trail_filter(trail_id: Uuid) -> Value {
        json!({ "trail": trail_id })
    }
}

impl Document for Content {
    const COLLECTION: Collection = Collection::Contents;
    const LABEL: &'static str = "Content";
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub trail_id: Option<Uuid>,
}

impl Validate for CreateContent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title);
        errors.require("content", &self.content);
        if self.trail_id.is_none() {
            errors.add("trailId", "This field is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContent {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Move the content under another trail.
    pub trail_id: Option<Uuid>,
    pub order: Option<i64>,
}

impl UpdateContent {
    /// Applies the scalar fields. Re-parenting is handled by the service so
    /// both trails' reference arrays follow the move.
    pub fn apply(self, content: &mut Content) {
        if let Some(title) = self.title {
            content.title = title;
        }
        if let Some(body) = self.content {
            content.content = body;
        }
        if let Some(trail) = self.trail_id {
            content.trail = trail;
        }
        if let Some(order) = self.order {
            content.order = order;
        }
    }
}

impl Validate for UpdateContent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("title", self.title.as_deref());
        errors.not_blank("content", self.content.as_deref());
        errors.into_result()
    }
}
