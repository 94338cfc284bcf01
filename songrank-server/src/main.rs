//! songrank-server - pairwise song ranking service
//!
//! Serves a voting page that shows two random songs, records which one the
//! listener prefers as an Elo update, and publishes a ranked leaderboard.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use songrank_common::config::{load_config, resolve_config_path, ConfigOverrides};
use songrank_common::db::init_database;
use songrank_server::import::import_catalog;
use songrank_server::logging::init_tracing;
use songrank_server::store::SqliteRecordStore;
use songrank_server::{build_router, AppState, RankingService};
use tokio::signal;
use tracing::{error, info, warn};

/// Command-line arguments for songrank-server
#[derive(Parser, Debug)]
#[command(name = "songrank-server")]
#[command(about = "Pairwise Elo ranking of a song catalog")]
#[command(version)]
struct Args {
    /// TOML bootstrap config file
    #[arg(short, long, env = "SONGRANK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "SONGRANK_DATABASE")]
    database: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "SONGRANK_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SONGRANK_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "SONGRANK_LOG_LEVEL")]
    log_level: Option<String>,

    /// JSON catalog file to import before serving (existing titles are kept)
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_path: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing first, so config loading can report a missing file
    let log_filter = init_tracing(args.log_level.as_deref())?;

    info!(
        "Starting SongRank server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_config(config_path.as_deref())
        .context("Failed to load configuration")?
        .apply_overrides(args.overrides());
    if let Err(e) = log_filter.apply_level(&config.logging.level) {
        warn!("{:#}, keeping current log level", e);
    }

    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults and overrides"),
    }
    info!("Database path: {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;
    let store = SqliteRecordStore::new(pool, config.persistence.max_lock_wait_ms);

    if let Some(path) = &args.import {
        let inserted = import_catalog(&store, path)
            .await
            .with_context(|| format!("Failed to import catalog from {}", path.display()))?;
        info!("✓ Imported {} new songs", inserted);
    }

    let service = RankingService::load(Arc::new(store))
        .await
        .context("Failed to load catalog")?;
    info!(
        "✓ Catalog ready: {} songs, {} votes so far",
        service.catalog().len(),
        service.vote_count()
    );

    let app = build_router(AppState::new(Arc::new(service)));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("songrank-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
