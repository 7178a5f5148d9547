//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::infrastructure::blob::filesystem::UPLOADS_ROUTE;

use super::{
    handler::{get_connections, get_stats, health_check, report_hazard, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// Stored photos under `upload_dir` are served at `/uploads`.
pub fn build_router(state: Arc<AppState>, upload_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/stats", get(get_stats))
        .route("/api/hazards/report", post(report_hazard))
        .route("/debug/connections", get(get_connections))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(upload_dir.into()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Road hazard alert server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, "uploads");
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    upload_dir: PathBuf,
}

impl Server {
    pub fn new(state: AppState, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            state: Arc::new(state),
            upload_dir: upload_dir.into(),
        }
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state, self.upload_dir);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Hazard alert server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?token=<jwt>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
