//! Dashboard server binary
//!
//! Reads the YAML file named by `DASHBOARD_CONFIG` (defaults otherwise),
//! applies `PORT` / `MONGO_URI` overrides and serves the API.

use anyhow::Result;
use dashboard::config::{DashboardConfig, StorageBackend};
use dashboard::labels::{LabelStore, default_labels};
use dashboard::server::ServerBuilder;
use dashboard::storage::{InMemoryLabelStore, InMemoryOrderStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("DASHBOARD_CONFIG") {
        Ok(path) => DashboardConfig::from_yaml_file(&path)?,
        Err(_) => DashboardConfig::default(),
    }
    .apply_env_overrides();

    let addr = config.bind_address();
    let builder = match config.storage.backend {
        StorageBackend::InMemory => in_memory_builder().await?,
        StorageBackend::Mongodb => mongodb_builder(&config).await?,
    };

    builder.serve(&addr).await
}

async fn in_memory_builder() -> Result<ServerBuilder> {
    tracing::info!("Using in-memory storage");

    let labels = InMemoryLabelStore::new();
    labels.seed(default_labels()).await?;

    Ok(ServerBuilder::new()
        .with_order_store(InMemoryOrderStore::new())
        .with_label_store(labels))
}

#[cfg(feature = "mongodb_backend")]
async fn mongodb_builder(config: &DashboardConfig) -> Result<ServerBuilder> {
    use dashboard::storage::mongodb::{MongoLabelStore, MongoOrderStore, connect};

    let database = connect(&config.storage.uri, config.storage.database.as_deref()).await?;
    tracing::info!(database = %database.name(), "Connected to MongoDB");

    let orders = MongoOrderStore::new(database.clone());
    orders.ensure_indexes().await?;

    let labels = MongoLabelStore::new(database);
    let seeded = labels.seed(default_labels()).await?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Default label configuration seeded");
    }

    Ok(ServerBuilder::new()
        .with_order_store(orders)
        .with_label_store(labels))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn mongodb_builder(_config: &DashboardConfig) -> Result<ServerBuilder> {
    anyhow::bail!("storage backend 'mongodb' requires the `mongodb_backend` feature")
}
