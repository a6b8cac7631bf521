use std::sync::Arc;

use anyhow::Context;
use shift_receipts::modules::shifts::adapters::outbound::master_data_in_memory::InMemoryMasterData;
use shift_receipts::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
use shift_receipts::shared::infrastructure::vision::http::HttpVisionEngine;
use shift_receipts::shell::config::AppConfig;
use shift_receipts::shell::http::router;
use shift_receipts::shell::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let master_data = match &config.master_data_path {
        Some(path) => InMemoryMasterData::from_seed_file(path)?,
        None => {
            warn!("SHIFTS_MASTER_DATA not set, starting with an empty master data directory");
            InMemoryMasterData::new()
        }
    };
    if config.vision.api_key.is_empty() {
        warn!("VISION_API_KEY not set, receipt extraction will be denied upstream");
    }
    let engine = HttpVisionEngine::new(config.vision.clone())
        .context("building the vision client")?;

    let state = AppState::in_memory(
        config.pipeline,
        master_data,
        InMemoryShiftStore::new(),
        Arc::new(engine),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "GraphiQL: http://{}/gql", config.bind_addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
