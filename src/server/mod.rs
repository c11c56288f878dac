//! REST API over the prompt store
//!
//! | Method | Path                                               | Operation            |
//! |--------|----------------------------------------------------|----------------------|
//! | GET    | `/health`                                          | liveness             |
//! | GET    | `/api/prompts`                                     | list prompts         |
//! | GET    | `/api/prompts/:filename`                           | read prompt          |
//! | PUT    | `/api/prompts/:filename`                           | save + snapshot      |
//! | GET    | `/api/prompts/history/tree`                        | list history         |
//! | GET    | `/api/prompts/history/:folder/:filename`           | read snapshot        |
//! | POST   | `/api/prompts/history/:folder/:filename/restore`   | restore snapshot     |
//!
//! Any origin may call the API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::storage::PromptStore;

pub mod error;
pub mod handlers;

/// Shared state handed to every handler
#[derive(Debug)]
pub struct AppState {
    pub store: PromptStore,
}

/// Build the API router around a store
pub fn router(store: PromptStore) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/prompts", get(handlers::list_prompts))
        .route("/api/prompts/history/tree", get(handlers::history_tree))
        .route(
            "/api/prompts/history/:folder/:filename",
            get(handlers::read_history_entry),
        )
        .route(
            "/api/prompts/history/:folder/:filename/restore",
            post(handlers::restore_history_entry),
        )
        .route(
            "/api/prompts/:filename",
            get(handlers::read_prompt).put(handlers::save_prompt),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the API until Ctrl-C
pub async fn serve(config: &ServerConfig, store: PromptStore) -> Result<()> {
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!("Prompt API listening on http://{}", bind_address);
    tracing::info!("Prompts directory: {}", store.prompts_dir().display());
    tracing::info!("History directory: {}", store.history_dir().display());

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
