// ============================
// crates/backend-bin/src/main.rs
// ============================
//! Tokio / Axum entry‑point for the `TaskTrack` API server.
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tasktrack_backend_lib::{config::Settings, router, storage::FlatFileStorage, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Multi-tenant task-tracking API server
#[derive(Parser, Debug)]
#[command(name = "tasktrack")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create storage
    let storage = FlatFileStorage::new(&settings.data_dir)?;

    // Create application state
    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(storage, settings));

    // Build the router
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
