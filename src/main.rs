use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learning_trails_api::clients::{http_client, HttpAuthClient, HttpUserClient};
use learning_trails_api::config::AppConfig;
use learning_trails_api::database::{DatabaseManager, PgDocumentStore};
use learning_trails_api::{app, AppState};

#[derive(Parser)]
#[command(name = "learning-trails-api")]
#[command(about = "REST backend for knowledge areas, subjects, journeys, trails and contents")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides BIND_ADDRESS)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and the service URLs
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    let default_filter = if config.api.enable_request_logging {
        "learning_trails_api=info,tower_http=debug"
    } else {
        "learning_trails_api=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Learning Trails API in {:?} mode", config.environment);

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the document store")?;
    database
        .ensure_collections()
        .await
        .context("failed to prepare collections")?;

    let http = http_client();
    let state = AppState::new(
        Arc::new(PgDocumentStore::new(database.pool())),
        Arc::new(HttpAuthClient::new(http.clone(), config.services.auth_url.clone())),
        Arc::new(HttpUserClient::new(http, config.services.user_url.clone())),
    );
    let router = app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
