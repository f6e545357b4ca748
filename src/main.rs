mod api;
mod config;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::storage::{InitMode, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("🚀 Starting Archaeology Catalog API");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.storage.db_path.display());
    info!("   - Reset on startup: {}", config.storage.reset_on_startup);
    info!("   - Server: {}", config.bind_addr());

    // Initialize schema
    let mode = if config.storage.reset_on_startup {
        InitMode::Reset
    } else {
        InitMode::CreateIfAbsent
    };
    storage::initialize(&config.storage.db_path, &config.storage.owner, mode)?;

    let state = AppState {
        store: Store::new(config.storage.db_path.clone()),
    };
    let app = api::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health");
    info!("   GET    /archaeologists            POST /archaeologists");
    info!("   GET    /archaeologists/filter");
    info!("   GET    /archaeologists/{{id}}       PUT/DELETE /archaeologists/{{id}}");
    info!("   GET    /items                     POST /items");
    info!("   GET    /items/sorted              GET  /items/{{id}}");
    info!("   GET    /findings                  POST /findings");
    info!("   GET    /findings/details          GET  /findings/group-by-archaeologist");
    info!("   PUT    /findings/update-condition");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
