use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::collection::Collection;
use crate::database::manager::DatabaseError;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry, StoredDocument};

/// In-process store with the same observable semantics as the Postgres one.
/// Used by the test suites and for running the API without a database.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<StoredDocument>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(body: &Value, filter: &serde_json::Map<String, Value>) -> bool {
        filter.iter().all(|(key, expected)| body.get(key) == Some(expected))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, DatabaseError> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            body,
            created_at: now,
            updated_at: now,
        };
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_matching(&self, collection: Collection, filter: Value) -> Result<Vec<StoredDocument>, DatabaseError> {
        let Value::Object(filter) = filter else {
            return Err(DatabaseError::Decode("filter must be a JSON object".to_string()));
        };
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| Self::matches(&d.body, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace(&self, collection: Collection, id: Uuid, body: Value) -> Result<Option<StoredDocument>, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.body = body;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(None);
        };
        let position = docs.iter().position(|d| d.id == id);
        Ok(position.map(|index| docs.remove(index)))
    }

    async fn bulk_set_order(&self, collection: Collection, entries: &[OrderEntry]) -> Result<BulkWriteSummary, DatabaseError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        let mut matched = 0;
        let mut modified = 0;
        for entry in entries {
            let Some(doc) = docs.iter_mut().find(|d| d.id == entry.id) else {
                continue;
            };
            matched += 1;

            let order = json!(entry.order);
            if doc.body.get("order") == Some(&order) {
                continue;
            }
            if let Value::Object(fields) = &mut doc.body {
                fields.insert("order".to_string(), order);
                doc.updated_at = Utc::now();
                modified += 1;
            }
        }

        Ok(BulkWriteSummary::acknowledged(matched, modified))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(orders: &[i64]) -> (MemoryDocumentStore, Vec<Uuid>) {
        let store = MemoryDocumentStore::new();
        let mut ids = Vec::new();
        for order in orders {
            let doc = store
                .insert(Collection::Trails, json!({ "name": "t", "order": order }))
                .await
                .unwrap();
            ids.push(doc.id);
        }
        (store, ids)
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let (store, ids) = seeded(&[0]).await;
        let doc = store.find_by_id(Collection::Trails, ids[0]).await.unwrap().unwrap();
        assert_eq!(doc.body["name"], "t");
        assert!(store.find_by_id(Collection::Contents, ids[0]).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_matching_compares_top_level_fields() {
        let store = MemoryDocumentStore::new();
        store.insert(Collection::Subjects, json!({ "user": "u1" })).await.unwrap();
        store.insert(Collection::Subjects, json!({ "user": "u2" })).await.unwrap();
        store.insert(Collection::Subjects, json!({ "user": "u1" })).await.unwrap();

        let found = store
            .find_matching(Collection::Subjects, json!({ "user": "u1" }))
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn delete_returns_removed_document_once() {
        let (store, ids) = seeded(&[0, 0]).await;
        assert!(store.delete(Collection::Trails, ids[0]).await.unwrap().is_some());
        assert!(store.delete(Collection::Trails, ids[0]).await.unwrap().is_none());
        assert_eq!(store.find_all(Collection::Trails).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_unknown_id_is_none() {
        let store = MemoryDocumentStore::new();
        let replaced = store
            .replace(Collection::Journeys, Uuid::new_v4(), json!({}))
            .await
            .unwrap();
        assert!(replaced.is_none());
    }

    #[tokio::test]
    async fn bulk_order_counts_matched_and_modified() {
        let (store, ids) = seeded(&[1, 2, 3]).await;
        let entries = [
            OrderEntry { id: ids[0], order: 3 },
            OrderEntry { id: ids[1], order: 2 },
            OrderEntry { id: Uuid::new_v4(), order: 1 },
        ];

        let summary = store.bulk_set_order(Collection::Trails, &entries).await.unwrap();
        assert_eq!(summary, BulkWriteSummary::acknowledged(2, 1));

        let untouched = store.find_by_id(Collection::Trails, ids[2]).await.unwrap().unwrap();
        assert_eq!(untouched.body["order"], 3);
        let moved = store.find_by_id(Collection::Trails, ids[0]).await.unwrap().unwrap();
        assert_eq!(moved.body["order"], 3);
    }

    #[tokio::test]
    async fn bulk_order_repeated_id_keeps_last_entry() {
        let (store, ids) = seeded(&[5]).await;
        let entries = [
            OrderEntry { id: ids[0], order: 5 },
            OrderEntry { id: ids[0], order: 7 },
            OrderEntry { id: ids[0], order: 9 },
        ];

        let summary = store.bulk_set_order(Collection::Trails, &entries).await.unwrap();
        assert_eq!(summary, BulkWriteSummary::acknowledged(3, 2));
        let doc = store.find_by_id(Collection::Trails, ids[0]).await.unwrap().unwrap();
        assert_eq!(doc.body["order"], 9);
    }

    #[tokio::test]
    async fn bulk_order_with_no_entries_is_a_noop() {
        let (store, _) = seeded(&[1]).await;
        let summary = store.bulk_set_order(Collection::Trails, &[]).await.unwrap();
        assert_eq!(summary, BulkWriteSummary::acknowledged(0, 0));
    }
}
