//! Runs the JSONB store against a live database. Every test returns early
//! when `DATABASE_URL` is not set.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use learning_trails_api::config::DatabaseConfig;
use learning_trails_api::database::{
    BulkWriteSummary, Collection, DatabaseManager, DocumentStore, MemoryDocumentStore, OrderEntry,
    PgDocumentStore, Repository,
};
use learning_trails_api::models::{Journey, JourneyParent};

async fn pg_store() -> Result<Option<PgDocumentStore>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return Ok(None);
    };
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        connection_timeout: 5,
    };
    let database = DatabaseManager::connect(&config).await.context("connect")?;
    database.ensure_collections().await.context("ensure collections")?;
    Ok(Some(PgDocumentStore::new(database.pool())))
}

async fn seed(store: &dyn DocumentStore, orders: &[i64]) -> Result<Vec<Uuid>> {
    let mut ids = Vec::new();
    for order in orders {
        let doc = store
            .insert(Collection::Trails, json!({ "name": "t", "journey": Uuid::new_v4(), "order": order }))
            .await?;
        ids.push(doc.id);
    }
    Ok(ids)
}

async fn order_of(store: &dyn DocumentStore, id: Uuid) -> Result<serde_json::Value> {
    let doc = store
        .find_by_id(Collection::Trails, id)
        .await?
        .context("seeded document missing")?;
    Ok(doc.body["order"].clone())
}

#[tokio::test]
async fn containment_filters_match_top_level_and_nested_values() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };

    let user = format!("user-{}", Uuid::new_v4());
    store.insert(Collection::Subjects, json!({ "name": "a", "user": user })).await?;
    store.insert(Collection::Subjects, json!({ "name": "b", "user": "someone-else" })).await?;
    store.insert(Collection::Subjects, json!({ "name": "c", "user": user })).await?;

    let found = store.find_matching(Collection::Subjects, json!({ "user": user })).await?;
    let names: Vec<_> = found.iter().map(|d| d.body["name"].clone()).collect();
    assert_eq!(names, vec![json!("a"), json!("c")]);

    let journeys: Repository<Journey> = Repository::new(Arc::new(store.clone()));
    let parent = Uuid::new_v4();
    let journey = journeys
        .insert(&Journey {
            title: "Fractions".into(),
            description: None,
            parent: JourneyParent::Subject(parent),
            trails: vec![],
            order: 1,
        })
        .await?;

    let under_subject = journeys.select_where(JourneyParent::Subject(parent).filter()).await?;
    assert_eq!(under_subject.len(), 1);
    assert_eq!(under_subject[0].id, journey.id);
    let under_point = journeys.select_where(JourneyParent::StartPoint(parent).filter()).await?;
    assert!(under_point.is_empty());

    Ok(())
}

#[tokio::test]
async fn replace_and_delete_unknown_ids_are_none() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };

    let missing = Uuid::new_v4();
    assert!(store.replace(Collection::Contents, missing, json!({})).await?.is_none());
    assert!(store.delete(Collection::Contents, missing).await?.is_none());

    let ids = seed(&store, &[1]).await?;
    let deleted = store.delete(Collection::Trails, ids[0]).await?;
    assert_eq!(deleted.map(|d| d.id), Some(ids[0]));
    assert!(store.find_by_id(Collection::Trails, ids[0]).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn save_rewrites_body_and_bumps_updated_at() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };

    let journeys: Repository<Journey> = Repository::new(Arc::new(store));
    let mut journey = journeys
        .insert(&Journey {
            title: "Before".into(),
            description: None,
            parent: JourneyParent::StartPoint(Uuid::new_v4()),
            trails: vec![],
            order: 0,
        })
        .await?;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    journey.title = "After".into();
    let saved = journeys.save(&journey).await?;
    assert_eq!(saved.title, "After");
    assert_eq!(saved.created_at, journey.created_at);
    assert!(saved.updated_at > journey.updated_at);

    Ok(())
}

#[tokio::test]
async fn bulk_order_counts_and_leaves_unmatched_alone() -> Result<()> {
    let Some(store) = pg_store().await? else { return Ok(()) };

    let ids = seed(&store, &[1, 2, 3]).await?;
    let entries = [
        OrderEntry { id: ids[0], order: 3 },
        OrderEntry { id: ids[1], order: 2 },
        OrderEntry { id: Uuid::new_v4(), order: 1 },
    ];

    let summary = store.bulk_set_order(Collection::Trails, &entries).await?;
    assert_eq!(summary, BulkWriteSummary::acknowledged(2, 1));
    assert!(summary.modified_count <= entries.len() as u64);
    assert_eq!(order_of(&store, ids[0]).await?, json!(3));
    assert_eq!(order_of(&store, ids[1]).await?, json!(2));
    assert_eq!(order_of(&store, ids[2]).await?, json!(3));

    let empty = store.bulk_set_order(Collection::Trails, &[]).await?;
    assert_eq!(empty, BulkWriteSummary::acknowledged(0, 0));

    Ok(())
}

#[tokio::test]
async fn bulk_order_repeated_ids_agree_with_memory_store() -> Result<()> {
    let Some(pg) = pg_store().await? else { return Ok(()) };
    let memory = MemoryDocumentStore::new();

    for orders in [[5, 7], [7, 5], [5, 5], [9, 7]] {
        let pg_id = seed(&pg, &[5]).await?[0];
        let memory_id = seed(&memory, &[5]).await?[0];
        let batch = |id| orders.map(|order| OrderEntry { id, order });

        let from_pg = pg.bulk_set_order(Collection::Trails, &batch(pg_id)).await?;
        let from_memory = memory.bulk_set_order(Collection::Trails, &batch(memory_id)).await?;
        assert_eq!(from_pg, from_memory, "orders {:?}", orders);
        assert_eq!(order_of(&pg, pg_id).await?, json!(orders[1]), "orders {:?}", orders);
        assert_eq!(order_of(&memory, memory_id).await?, json!(orders[1]));
    }

    Ok(())
}
