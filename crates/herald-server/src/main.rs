use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use herald_api::AppStateInner;
use herald_panel::{Composer, Dispatcher, PanelConfig, SqliteStore};
use herald_types::PanelEvent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=debug,tower_http=debug".into()),
        )
        .init();

    let config = PanelConfig::from_env()?;
    info!(native = ?config.native, "Configuration loaded");

    // Init database
    let db = Arc::new(herald_db::Database::open(&config.db_path)?);

    // Shared state
    let dispatcher = Dispatcher::new(
        Arc::new(SqliteStore::new(db)),
        config.native.notifier(),
        config.icon.clone(),
    );
    tokio::spawn(log_panel_events(dispatcher.subscribe()));

    let state = Arc::new(AppStateInner {
        composer: Composer::new(dispatcher),
    });

    let app = herald_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Herald panel listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Stands in for the parent view: logs what the panel reports.
async fn log_panel_events(mut rx: broadcast::Receiver<PanelEvent>) {
    loop {
        match rx.recv().await {
            Ok(PanelEvent::NotificationAdded { id }) => info!(%id, "Notification list changed"),
            Ok(PanelEvent::Acknowledged(ack)) => info!("{}", ack.message()),
            Ok(PanelEvent::Closed) => info!("Panel closed by user"),
            Err(broadcast::error::RecvError::Lagged(n)) => warn!("Panel event log lagged by {} events", n),
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
