use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::validate::{Validate, ValidationErrors};
use super::{Document, Parent};
use crate::database::collection::Collection;

/// A Journey hangs off exactly one parent: a Subject or a Start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum JourneyParent {
    Subject(Uuid),
    #[serde(rename = "point")]
    StartPoint(Uuid),
}

impl JourneyParent {
    pub fn id(&self) -> Uuid {
        match self {
            JourneyParent::Subject(id) | JourneyParent::StartPoint(id) => *id,
        }
    }

    /// Containment filter selecting the journeys under this parent.
    pub fn filter(&self) -> Value {
        json!({ "parent": self })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parent: JourneyParent,
    #[serde(default)]
    pub trails: Vec<Uuid>,
    #[serde(default)]
    pub order: i64,
}

impl Document for Journey {
    const COLLECTION: Collection = Collection::Journeys;
    const LABEL: &'static str = "Journey";
}

impl Parent for Journey {
    fn children(&self) -> &[Uuid] {
        &self.trails
    }

    fn children_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.trails
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJourney {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub subject_id: Option<Uuid>,
    pub point_id: Option<Uuid>,
}

impl CreateJourney {
    /// The declared parent. Only meaningful after `validate` passed.
    pub fn parent(&self) -> Option<JourneyParent> {
        match (self.subject_id, self.point_id) {
            (Some(id), None) => Some(JourneyParent::Subject(id)),
            (None, Some(id)) => Some(JourneyParent::StartPoint(id)),
            _ => None,
        }
    }

    pub fn into_journey(self, parent: JourneyParent, order: i64) -> Journey {
        Journey {
            title: self.title,
            description: self.description,
            parent,
            trails: Vec::new(),
            order,
        }
    }
}

impl Validate for CreateJourney {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", &self.title);
        match (self.subject_id, self.point_id) {
            (None, None) => errors.add("subjectId", "Either subjectId or pointId is required"),
            (Some(_), Some(_)) => errors.add("pointId", "Only one of subjectId or pointId may be given"),
            _ => {}
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJourney {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl UpdateJourney {
    pub fn apply(self, journey: &mut Journey) {
        if let Some(title) = self.title {
            journey.title = title;
        }
        if let Some(description) = self.description {
            journey.description = Some(description);
        }
        if let Some(order) = self.order {
            journey.order = order;
        }
    }
}

impl Validate for UpdateJourney {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("title", self.title.as_deref());
        errors.into_result()
    }
}

/// Body of `PATCH /journeys/:id/add-trail`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageJourneyTrail {
    pub trail_id: Option<Uuid>,
}

impl Validate for ManageJourneyTrail {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.trail_id.is_none() {
            errors.add("trailId", "This field is required");
        }
        errors.into_result()
    }
}
