use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::{Validate, ValidationErrors};
use super::{Document, Parent};
use crate::database::collection::Collection;

/// Alternative root for Journeys, owned by a user like a Subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPoint {
    pub name: String,
    pub description: String,
    pub user: String,
    #[serde(default)]
    pub journeys: Vec<Uuid>,
    #[serde(default)]
    pub order: i64,
}

impl Document for StartPoint {
    const COLLECTION: Collection = Collection::StartPoints;
    const LABEL: &'static str = "Start point";
}

impl Parent for StartPoint {
    fn children(&self) -> &[Uuid] {
        &self.journeys
    }

    fn children_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.journeys
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStartPoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub order: Option<i64>,
}

impl CreateStartPoint {
    pub fn into_start_point(self, user: String) -> StartPoint {
        StartPoint {
            name: self.name,
            description: self.description,
            user,
            journeys: Vec::new(),
            order: self.order.unwrap_or(0),
        }
    }
}

impl Validate for CreateStartPoint {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("description", &self.description);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStartPoint {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl UpdateStartPoint {
    pub fn apply(self, point: &mut StartPoint) {
        if let Some(name) = self.name {
            point.name = name;
        }
        if let Some(description) = self.description {
            point.description = description;
        }
        if let Some(order) = self.order {
            point.order = order;
        }
    }
}

impl Validate for UpdateStartPoint {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("name", self.name.as_deref());
        errors.not_blank("description", self.description.as_deref());
        errors.into_result()
    }
}

/// Body of `PATCH /points/:id/add-journey`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageStartPointJourney {
    pub journey_id: Option<Uuid>,
}

impl Validate for ManageStartPointJourney {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.journey_id.is_none() {
            errors.add("journeyId", "This field is required");
        }
        errors.into_result()
    }
}
