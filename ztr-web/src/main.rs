//! Zero Test Result lookup page (ztr-web) - Main entry point
//!
//! Serves the roll number lookup page backed by the hosted students table.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ztr_common::config::TomlConfig;
use ztr_common::store::PostgrestStore;
use ztr_web::{build_router, AppState};

/// Command-line arguments for ztr-web
#[derive(Parser, Debug)]
#[command(name = "ztr-web")]
#[command(about = "Zero Test Result lookup page")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "ZTR_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "ZTR_HOST")]
    host: std::net::IpAddr,

    /// Store base URL (overrides ZTR_STORE_URL and config.toml)
    #[arg(long)]
    store_url: Option<String>,

    /// Store access key (overrides ZTR_STORE_KEY and config.toml)
    #[arg(long)]
    store_key: Option<String>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ztr_web=debug,ztr_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting Zero Test Result lookup (ztr-web) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let store_config = config
        .resolve_store(args.store_url.as_deref(), args.store_key.as_deref())
        .context("Failed to resolve store credentials")?;
    let grades = config.grade_table().context("Failed to load grade bands")?;

    info!("Student store: {}", store_config.url);
    info!("Grade bands: {}", grades.bands().len());

    let store = PostgrestStore::new(&store_config.url, &store_config.api_key)
        .context("Failed to create store client")?;

    let state = AppState::new(Arc::new(store), grades);
    let app = build_router(state);

    let addr = SocketAddr::new(args.host, args.port);
    info!("ztr-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
