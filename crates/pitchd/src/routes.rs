//! API routes for pitchd
//!
//! - `GET /` liveness text
//! - `GET /health` health check, independent of the model provider
//! - `POST /api/generate-response` prospect reply plus evaluation

use crate::gateway::GatewayError;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pitch_common::{ConversationTurn, ErrorResponse, GenerateResponse, HealthResponse};
use std::sync::Arc;
use tracing::error;

type AppStateArc = Arc<AppState>;

pub const ROOT_MESSAGE: &str = "Backend is running! Use /health endpoint to check status.";

/// Request failure reported as 500 with `{"error": "<message>"}`
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// ============================================================================
// Roleplay Routes
// ============================================================================

pub fn roleplay_routes() -> Router<AppStateArc> {
    Router::new().route("/api/generate-response", post(generate_response))
}

async fn generate_response(
    State(state): State<AppStateArc>,
    payload: Result<Json<ConversationTurn>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(turn) = payload.map_err(|rejection| {
        let err = ApiError::from(rejection);
        error!("Error: {}", err.message());
        err
    })?;

    let response = state.orchestrator.respond(&turn).await.map_err(|e| {
        let err = ApiError::from(e);
        error!("Error: {}", err.message());
        err
    })?;

    Ok(Json(response))
}
