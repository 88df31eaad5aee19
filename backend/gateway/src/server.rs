//! Main HTTP Gateway Server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use somark_plugins::SomarkSyncPlugin;

use crate::{health_api, rpc, tools_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub plugin: Arc<SomarkSyncPlugin>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(plugin: Arc<SomarkSyncPlugin>) -> Self {
        Self {
            plugin,
            started_at: Instant::now(),
        }
    }
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/health", get(health_api::get_health))
        .route("/rpc", post(rpc::handle_rpc))
        .route("/api/tools", get(tools_api::list_tools))
        .route("/api/tools/:name", post(tools_api::invoke_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: GatewayState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("gateway server failed")
}

/// Starts the gateway HTTP server.
#[instrument(skip(state, shutdown))]
pub async fn start_server<F>(addr: SocketAddr, state: GatewayState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind gateway to {addr}"))?;
    info!("Gateway HTTP server listening on {}", listener.local_addr()?);
    serve(listener, state, shutdown).await
}
