use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::{Validate, ValidationErrors};
use super::{Document, Parent};
use crate::database::collection::Collection;

pub const SHORT_NAME_MAX: usize = 10;

fn default_short_name() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,
    #[serde(default = "default_short_name")]
    pub short_name: String,
    pub description: String,
    pub user: String,
    #[serde(default)]
    pub journeys: Vec<Uuid>,
    #[serde(default)]
    pub order: i64,
}

impl Document for Subject {
    const COLLECTION: Collection = Collection::Subjects;
    const LABEL: &'static str = "Subject";
}

impl Parent for Subject {
    fn children(&self) -> &[Uuid] {
        &self.journeys
    }

    fn children_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.journeys
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubject {
    #[serde(default)]
    pub name: String,
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub order: Option<i64>,
    /// Create the subject as a child of this Knowledge Area.
    pub knowledge_id: Option<Uuid>,
}

impl CreateSubject {
    pub fn into_subject(self, user: String) -> Subject {
        Subject {
            name: self.name,
            short_name: self.short_name.unwrap_or_else(default_short_name),
            description: self.description,
            user,
            journeys: Vec::new(),
            order: self.order.unwrap_or(0),
        }
    }
}

impl Validate for CreateSubject {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("description", &self.description);
        errors.max_len("shortName", self.short_name.as_deref(), SHORT_NAME_MAX);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

impl UpdateSubject {
    pub fn apply(self, subject: &mut Subject) {
        if let Some(name) = self.name {
            subject.name = name;
        }
        if let Some(short_name) = self.short_name {
            subject.short_name = short_name;
        }
        if let Some(description) = self.description {
            subject.description = description;
        }
        if let Some(order) = self.order {
            subject.order = order;
        }
    }
}

impl Validate for UpdateSubject {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("name", self.name.as_deref());
        errors.not_blank("description", self.description.as_deref());
        errors.max_len("shortName", self.short_name.as_deref(), SHORT_NAME_MAX);
        errors.into_result()
    }
}
