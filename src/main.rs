mod api;
mod config;
mod engine;
mod error;
mod models;
mod observability;
mod state;
mod store;

use std::sync::Arc;

use axum::http::{header, Method};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use crate::store::{MemoryOrderStore, OrderStore, PgOrderStore};

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let store: Arc<dyn OrderStore> = match config.database_url.as_deref() {
        Some(url) => {
            let store = PgOrderStore::connect(url, config.db_max_connections).await?;
            tracing::info!(
                max_connections = config.db_max_connections,
                "using postgres order store"
            );
            Arc::new(store)
        }
        None => {
            tracing::info!("DATABASE_URL not set; using in-memory order store");
            Arc::new(MemoryOrderStore::new())
        }
    };

    let shared_state = Arc::new(state::AppState::new(store));
    let mut app = api::rest::router(shared_state);

    if let Some(origin) = config.dashboard_origin.clone() {
        tracing::info!(origin = ?origin, "allowing cross-origin dashboard");
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
