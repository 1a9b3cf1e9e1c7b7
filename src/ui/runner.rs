//! Router assembly and server entry point.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::ui::handler::{
    create_group, get_group, get_group_messages, health_check, websocket_handler,
};
use crate::ui::state::AppState;

/// Build the axum router over the shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/group/{group_name}", get(get_group))
        .route("/group/{group_name}/messages", get(get_group_messages))
        .route("/create-group", post(create_group))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is terminated
pub async fn run_server(
    host: &str,
    port: u16,
    state: Arc<AppState>,
) -> Result<(), std::io::Error> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
