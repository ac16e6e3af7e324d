//! HTTP server for pitchd

use crate::gateway::ChatGateway;
use crate::orchestrator::RoleplayOrchestrator;
use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use pitch_common::PitchConfig;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers.
///
/// Built once at startup; holds the single gateway client and is never
/// mutated afterwards.
pub struct AppState {
    pub orchestrator: RoleplayOrchestrator,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ChatGateway>, config: &PitchConfig) -> Self {
        Self {
            orchestrator: RoleplayOrchestrator::new(gateway, &config.llm),
        }
    }
}

/// Build the router with permissive CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::roleplay_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(config: &PitchConfig, gateway: Arc<dyn ChatGateway>) -> Result<()> {
    let state = AppState::new(gateway, config);
    let (reply, evaluation) = (
        state.orchestrator.reply_sampling(),
        state.orchestrator.evaluation_sampling(),
    );
    info!(
        "[BOOT] Reply sampling: temperature {} max_tokens {}",
        reply.temperature, reply.max_tokens
    );
    info!(
        "[BOOT] Evaluation sampling: temperature {} max_tokens {}",
        evaluation.temperature, evaluation.max_tokens
    );
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
