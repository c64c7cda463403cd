use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::validate::{Validate, ValidationErrors};
use super::{Document, Parent};
use crate::database::collection::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub journey: Uuid,
    #[serde(default)]
    pub contents: Vec<Uuid>,
    #[serde(default)]
    pub order: i64,
}

impl Trail {
    pub fn journey_filter(journey_id: Uuid) -> Value {
        json!({ "journey": journey_id })
    }
}

impl Document for Trail {
    const COLLECTION: Collection = Collection::Trails;
    const LABEL: &'static str = "Trail";
}

impl Parent for Trail {
    fn children(&self) -> &[Uuid] {
        &self.contents
    }

    fn children_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.contents
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrail {
    #[serde(default)]
    pub name: String,
    pub journey_id: Option<Uuid>,
}

impl Validate for CreateTrail {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if self.journey_id.is_none() {
            errors.add("journeyId", "This field is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrail {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl UpdateTrail {
    pub fn apply(self, trail: &mut Trail) {
        if let Some(name) = self.name {
            trail.name = name;
        }
        if let Some(description) = self.description {
            trail.description = Some(description);
        }
        if let Some(order) = self.order {
            trail.order = order;
        }
    }
}

impl Validate for UpdateTrail {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("name", self.name.as_deref());
        errors.into_result()
    }
}

/// Body of the add/remove content endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageTrailContent {
    pub content_id: Option<Uuid>,
}

impl Validate for ManageTrailContent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.content_id.is_none() {
            errors.add("contentId", "This field is required");
        }
        errors.into_result()
    }
}
