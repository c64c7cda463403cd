use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::database::collection::Collection;
use crate::database::manager::DatabaseError;

/// A raw document as held by the store: generated id, timestamps and the
/// JSON body carrying every entity field.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One `(id, order)` pair of a reorder batch. Clients post back whole
/// documents, so unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub order: i64,
}

/// Summary returned by a bulk order write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkWriteSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl BulkWriteSummary {
    pub fn acknowledged(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

/// The reference store: one collection per entity kind.
///
/// Every method is a single storage round trip. Nothing here spans more than
/// one document write atomically, apart from what the backend gives a single
/// bulk statement.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under a freshly generated id.
    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, DatabaseError>;

    /// All documents, oldest first.
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError>;

    /// Documents whose body contains every top-level key/value of `filter`.
    async fn find_matching(&self, collection: Collection, filter: Value) -> Result<Vec<StoredDocument>, DatabaseError>;

    /// Replace the body of an existing document. `None` when the id is unknown.
    async fn replace(&self, collection: Collection, id: Uuid, body: Value) -> Result<Option<StoredDocument>, DatabaseError>;

    /// Remove a document, returning it. `None` when the id is unknown.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError>;

    /// Batch of "set order where id" updates applied in input order, so a
    /// repeated id keeps its last order. Each entry that hits a document is
    /// matched; it is modified when it changes the order held at its turn.
    /// Unknown ids are silently unmatched.
    async fn bulk_set_order(&self, collection: Collection, entries: &[OrderEntry]) -> Result<BulkWriteSummary, DatabaseError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), DatabaseError>;
}
