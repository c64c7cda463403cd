use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::database::collection::Collection;
use crate::database::manager::{quote_identifier, DatabaseError};
use crate::database::store::{BulkWriteSummary, DocumentStore, OrderEntry, StoredDocument};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// JSONB-backed document store, one table per collection.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn table(collection: Collection) -> String {
        quote_identifier(collection.table_name())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (id, body) VALUES ($1, $2) RETURNING id, body, created_at, updated_at",
            Self::table(collection)
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&body)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, DatabaseError> {
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM {} ORDER BY created_at, id",
            Self::table(collection)
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM {} WHERE id = $1",
            Self::table(collection)
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_matching(&self, collection: Collection, filter: Value) -> Result<Vec<StoredDocument>, DatabaseError> {
        let sql = format!(
            "SELECT id, body, created_at, updated_at FROM {} WHERE body @> $1 ORDER BY created_at, id",
            Self::table(collection)
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(&filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn replace(&self, collection: Collection, id: Uuid, body: Value) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!(
            "UPDATE {} SET body = $2, updated_at = now() WHERE id = $1 RETURNING id, body, created_at, updated_at",
            Self::table(collection)
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .bind(&body)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, body, created_at, updated_at",
            Self::table(collection)
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn bulk_set_order(&self, collection: Collection, entries: &[OrderEntry]) -> Result<BulkWriteSummary, DatabaseError> {
        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let orders: Vec<i64> = entries.iter().map(|e| e.order).collect();

        // Entries apply in input order. A repeated id ends at its last entry,
        // and every entry that changes the order at its turn counts as modified.
        let sql = format!(
            r#"WITH input AS (
                   SELECT v.id, v.ord, v.pos
                   FROM unnest($1::uuid[], $2::bigint[]) WITH ORDINALITY AS v(id, ord, pos)
               ),
               steps AS (
                   SELECT input.id, input.ord, input.pos,
                          COALESCE(
                              lag(to_jsonb(input.ord)) OVER (PARTITION BY input.id ORDER BY input.pos),
                              t.body -> 'order'
                          ) AS previous
                   FROM input JOIN {table} t ON t.id = input.id
               ),
               changed AS (
                   SELECT id FROM steps WHERE previous IS DISTINCT FROM to_jsonb(ord)
               ),
               latest AS (
                   SELECT DISTINCT ON (id) id, ord FROM steps ORDER BY id, pos DESC
               ),
               modified AS (
                   UPDATE {table} t
                   SET body = jsonb_set(t.body, '{{order}}', to_jsonb(l.ord)), updated_at = now()
                   FROM latest l
                   WHERE t.id = l.id AND l.id IN (SELECT id FROM changed)
                   RETURNING t.id
               )
               SELECT (SELECT count(*) FROM steps) AS matched,
                      (SELECT count(*) FROM changed) AS modified"#,
            table = Self::table(collection)
        );

        let row = sqlx::query(&sql)
            .bind(&ids)
            .bind(&orders)
            .fetch_one(&self.pool)
            .await?;

        let matched: i64 = row.try_get("matched")?;
        let modified: i64 = row.try_get("modified")?;
        debug!(
            "Bulk order write on {}: {} entries, {} matched, {} modified",
            collection,
            entries.len(),
            matched,
            modified
        );
        Ok(BulkWriteSummary::acknowledged(matched.max(0) as u64, modified.max(0) as u64))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
