pub mod handlers;

use crate::core::generation::PostGenerator;
use crate::core::ChatProvider;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared handler state. Cloned per request; the generator is read-only.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PostGenerator>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            generator: Arc::new(PostGenerator::new(provider)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/generate", post(handlers::generate))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

pub async fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);
    Ok(listener)
}
