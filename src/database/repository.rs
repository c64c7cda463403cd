use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry, StoredDocument};
use crate::models::{Document, Stored};

/// Typed view of one collection of the document store.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    fn decode(doc: StoredDocument) -> Result<Stored<T>, DatabaseError> {
        Ok(Stored {
            id: doc.id,
            data: serde_json::from_value(doc.body)?,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }

    fn decode_all(docs: Vec<StoredDocument>) -> Result<Vec<Stored<T>>, DatabaseError> {
        docs.into_iter().map(Self::decode).collect()
    }

    fn not_found(id: Uuid) -> DatabaseError {
        DatabaseError::NotFound(format!("{} with ID {} not found", T::LABEL, id))
    }

    pub async fn insert(&self, data: &T) -> Result<Stored<T>, DatabaseError> {
        let body = serde_json::to_value(data)?;
        Self::decode(self.store.insert(T::COLLECTION, body).await?)
    }

    pub async fn select_all(&self) -> Result<Vec<Stored<T>>, DatabaseError> {
        Self::decode_all(self.store.find_all(T::COLLECTION).await?)
    }

    pub async fn select_one(&self, id: Uuid) -> Result<Option<Stored<T>>, DatabaseError> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Like `select_one` but a missing document is `NotFound`.
    pub async fn select_404(&self, id: Uuid) -> Result<Stored<T>, DatabaseError> {
        self.select_one(id).await?.ok_or_else(|| Self::not_found(id))
    }

    /// Documents whose fields contain `filter`.
    pub async fn select_where(&self, filter: Value) -> Result<Vec<Stored<T>>, DatabaseError> {
        Self::decode_all(self.store.find_matching(T::COLLECTION, filter).await?)
    }

    /// Write back every field of a loaded document.
    pub async fn save(&self, doc: &Stored<T>) -> Result<Stored<T>, DatabaseError> {
        let body = serde_json::to_value(&doc.data)?;
        match self.store.replace(T::COLLECTION, doc.id, body).await? {
            Some(saved) => Self::decode(saved),
            None => Err(Self::not_found(doc.id)),
        }
    }

    pub async fn delete_404(&self, id: Uuid) -> Result<Stored<T>, DatabaseError> {
        match self.store.delete(T::COLLECTION, id).await? {
            Some(deleted) => Self::decode(deleted),
            None => Err(Self::not_found(id)),
        }
    }

    pub async fn bulk_set_order(&self, entries: &[OrderEntry]) -> Result<BulkWriteSummary, DatabaseError> {
        self.store.bulk_set_order(T::COLLECTION, entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryDocumentStore;
    use crate::models::Content;

    fn repo() -> Repository<Content> {
        Repository::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn content(trail: Uuid) -> Content {
        Content {
            title: "Intro".into(),
            content: "Hello".into(),
            trail,
            order: 1,
        }
    }

    #[tokio::test]
    async fn insert_select_save_delete() {
        let repo = repo();
        let trail = Uuid::new_v4();
        let mut stored = repo.insert(&content(trail)).await.unwrap();
        assert_eq!(stored.title, "Intro");

        stored.title = "Renamed".into();
        repo.save(&stored).await.unwrap();
        assert_eq!(repo.select_404(stored.id).await.unwrap().title, "Renamed");

        assert_eq!(repo.select_where(Content::trail_filter(trail)).await.unwrap().len(), 1);
        assert!(repo.select_where(Content::trail_filter(Uuid::new_v4())).await.unwrap().is_empty());

        repo.delete_404(stored.id).await.unwrap();
        assert!(repo.select_one(stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let repo = repo();
        let id = Uuid::new_v4();

        let err = repo.select_404(id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(ref msg) if msg == &format!("Content with ID {} not found", id)));
        assert!(matches!(repo.delete_404(id).await.unwrap_err(), DatabaseError::NotFound(_)));

        let ghost = Stored {
            id,
            data: content(Uuid::new_v4()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(matches!(repo.save(&ghost).await.unwrap_err(), DatabaseError::NotFound(_)));
    }
}
