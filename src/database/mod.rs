pub mod collection;
pub mod manager;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use collection::Collection;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use repository::Repository;
pub use store::{BulkWriteSummary, DocumentStore, OrderEntry, StoredDocument};
