pub mod content;
pub mod journey;
pub mod knowledge;
pub mod order;
pub mod start_point;
pub mod subject;
pub mod trail;
pub mod validate;

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::database::collection::Collection;

pub use content::{Content, CreateContent, UpdateContent};
pub use journey::{CreateJourney, Journey, JourneyParent, ManageJourneyTrail, UpdateJourney};
pub use knowledge::{CreateKnowledge, Knowledge, UpdateKnowledge};
pub use order::{ContentOrder, JourneyOrder, KnowledgeOrder, StartPointOrder, SubjectOrder, TrailOrder};
pub use start_point::{CreateStartPoint, ManageStartPointJourney, StartPoint, UpdateStartPoint};
pub use subject::{CreateSubject, Subject, UpdateSubject};
pub use trail::{CreateTrail, ManageTrailContent, Trail, UpdateTrail};
pub use validate::{Validate, ValidationErrors};

/// An entity kind persisted in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human label used in error messages ("Subject with ID ... not found").
    const LABEL: &'static str;
}

/// A document holding a reference array naming its children.
pub trait Parent: Document {
    fn children(&self) -> &[Uuid];
    fn children_mut(&mut self) -> &mut Vec<Uuid>;
}

/// A document as returned to clients: store-generated id and timestamps
/// around the entity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Stored<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

/// Append `id` unless an equal id is already present.
pub(crate) fn push_unique(ids: &mut Vec<Uuid>, id: Uuid) -> bool {
    if ids.contains(&id) {
        return false;
    }
    ids.push(id);
    true
}
