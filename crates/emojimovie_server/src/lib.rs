//! HTTP layer for the emoji movie service.
//!
//! # Responsibility
//! - Map GET routes onto read-only queries over [`state::AppState`].
//! - Bind, serve and shut down on Ctrl-C.

pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use emojimovie_core::AppConfig;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use error::{ApiError, StartupError};
pub use state::{AppState, MappingBackend};

/// Builds the router over shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/emojis", get(routes::emojis::random_mapping))
        .route("/emojis/all", get(routes::emojis::list_mappings))
        .route("/emojis/random.txt", get(routes::emojis::random_mapping_text))
        .route("/convert", get(routes::convert::convert_sequence))
        .with_state(state)
        .layer(cors)
}

/// Serves `state` on the configured address until Ctrl-C.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<(), StartupError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "event=server_start module=server status=ok addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: run until the process is killed.
        std::future::pending::<()>().await;
    }
}
