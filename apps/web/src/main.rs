mod config;
mod errors;
mod export;
mod history;
mod loader;
mod models;
mod results;
mod routes;
mod state;
mod storage;
mod theme;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerLens web v{}", env!("CARGO_PKG_VERSION"));

    // Profile storage: history log and theme live here across restarts
    let storage = FileStore::open(&config.data_dir).with_context(|| {
        format!("Cannot open data directory {}", config.data_dir.display())
    })?;
    info!("Profile storage at {}", storage.dir().display());

    let state = AppState::new(&config, Arc::new(storage));
    info!(
        "Theme: {}, history entries: {}",
        state.theme.current(),
        state.history.list().len()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
