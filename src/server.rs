//! HTTP surface of the tutor.
//!
//! - `POST /api/solve`: solve an exercise and judge the student's answer
//! - `GET  /health`: server and knowledge base status
//!
//! Errors are returned as `{"error": "..."}` with 400 for bad input and 500
//! when the knowledge base is unavailable.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::error::TutorError;
use crate::tutor::{SolveRequest, Tutor, Verdict};

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    tutor: Tutor,
}

// ── Response types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct KnowledgeStatus {
    loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    knowledge: KnowledgeStatus,
}

/// An error rendered as `{"error": message}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<TutorError> for ApiError {
    fn from(e: TutorError) -> Self {
        let status = if e.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("invalid request body: {e}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let kb = state.tutor.knowledge().base();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        knowledge: KnowledgeStatus {
            loaded: kb.is_some(),
            id: kb.map(|kb| kb.id.clone()),
            version: kb.map(|kb| kb.version.clone()),
        },
    })
}

async fn solve(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Verdict>, ApiError> {
    // The body is JSON whatever the Content-Type header says.
    let request: SolveRequest = serde_json::from_slice(&body)?;
    let verdict = state.tutor.check(&request)?;
    Ok(Json(verdict))
}

/// Build the application router around a tutor.
pub fn router(tutor: Tutor) -> Router {
    let state = Arc::new(ServerState { tutor });
    Router::new()
        .route("/health", get(health))
        .route("/api/solve", post(solve))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
