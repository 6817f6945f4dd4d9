//! HTTP API.
//!
//! Thin transport layer over [`MatchService`]:
//!
//! - `POST /match`: rank a platform's candidates against a target vector
//! - `GET /health`: liveness probe
//!
//! Request validation failures (mismatched vector lengths, unknown
//! platforms, malformed JSON) map to 400; storage failures map to 500. The
//! caller receives either a clear rejection or a fully ranked list, never
//! a partial result.

use crate::models::MatchRequest;
use crate::services::MatchService;
use crate::{Error, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Permissive CORS because the original deployment serves a browser
/// dashboard from another origin.
pub fn router(service: Arc<MatchService>) -> Router {
    Router::new()
        .route("/match", post(handle_match))
        .route("/health", get(handle_health))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds and serves the HTTP API until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(service: Arc<MatchService>, addr: SocketAddr) -> Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "bind".to_string(),
            cause: e.to_string(),
        })?;

    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

/// `POST /match` handler.
async fn handle_match(
    State(service): State<Arc<MatchService>>,
    Json(request): Json<MatchRequest>,
) -> impl IntoResponse {
    match service.match_candidates(&request) {
        Ok(matches) => (StatusCode::OK, Json(serde_json::json!(matches))),
        Err(e) => error_response(&e),
    }
}

/// `GET /health` handler.
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Maps a service error to an HTTP response.
fn error_response(error: &Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match error {
        Error::DimensionMismatch { .. } | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "match request failed");
    }

    (status, Json(serde_json::json!({ "error": error.to_string() })))
}
