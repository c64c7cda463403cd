use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::{is_hex_color, Validate, ValidationErrors};
use super::{Document, Parent};
use crate::database::collection::Collection;

pub const DEFAULT_COLOR: &str = "#e0e0e0";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Knowledge Area: top of the hierarchy, owns an ordered list of Subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knowledge {
    pub name: String,
    pub description: String,
    pub user: String,
    #[serde(default)]
    pub subjects: Vec<Uuid>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Document for Knowledge {
    const COLLECTION: Collection = Collection::Knowledges;
    const LABEL: &'static str = "Knowledge Area";
}

impl Parent for Knowledge {
    fn children(&self) -> &[Uuid] {
        &self.subjects
    }

    fn children_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.subjects
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKnowledge {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub order: Option<i64>,
    pub color: Option<String>,
}

impl CreateKnowledge {
    pub fn into_knowledge(self, user: String) -> Knowledge {
        Knowledge {
            name: self.name,
            description: self.description,
            user,
            subjects: Vec::new(),
            order: self.order.unwrap_or(0),
            color: self.color.unwrap_or_else(default_color),
        }
    }
}

impl Validate for CreateKnowledge {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("description", &self.description);
        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                errors.add("color", "Invalid hex color code");
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKnowledge {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
    pub color: Option<String>,
}

impl UpdateKnowledge {
    pub fn apply(self, knowledge: &mut Knowledge) {
        if let Some(name) = self.name {
            knowledge.name = name;
        }
        if let Some(description) = self.description {
            knowledge.description = description;
        }
        if let Some(order) = self.order {
            knowledge.order = order;
        }
        if let Some(color) = self.color {
            knowledge.color = color;
        }
    }
}

impl Validate for UpdateKnowledge {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("name", self.name.as_deref());
        errors.not_blank("description", self.description.as_deref());
        if self.color.as_deref().is_some_and(|c| !is_hex_color(c)) {
            errors.add("color", "Invalid hex color code");
        }
        errors.into_result()
    }
}
