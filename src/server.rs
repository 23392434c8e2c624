//! HTTP API for the search bridge.
//!
//! Two routes: `POST /api/search` runs the pipeline for a `{query}` body,
//! `GET /health` answers liveness probes. All state is built once at
//! startup and shared read-only behind an [`Arc`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::{Result, SearchError};
use crate::index::IndexClient;
use crate::orchestrator;
use crate::schema::IndexSchema;
use crate::summary::SummaryClient;

/// Shared state for axum handlers.
///
/// The schema snapshot is populated once during startup and never mutated
/// afterwards, so handlers read it without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Index field lists, inspected once at startup.
    pub schema: IndexSchema,
    /// Search index collaborator.
    pub index: IndexClient,
    /// Summarization collaborator.
    pub summary: SummaryClient,
}

/// Build the API router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", post(handle_search))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Bind and serve the API until the process exits.
///
/// # Errors
///
/// Returns [`SearchError::Server`] if the listener cannot bind or the
/// server loop fails.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> Result<()> {
    let bind_addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| SearchError::Server(format!("bind to {bind_addr} failed: {e}")))?;

    let addr = listener
        .local_addr()
        .map_err(|e| SearchError::Server(format!("failed to get local addr: {e}")))?;
    info!("search API listening on http://{addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| SearchError::Server(format!("server error: {e}")))
}

/// `GET /health`: fixed healthy status.
async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

/// `POST /api/search`: validate the query and run the pipeline.
///
/// Input problems are the caller's: a missing body or `query` member gets
/// 400 before the orchestrator is invoked. A failed search call maps to
/// 500 with the same `{error}` shape.
async fn handle_search(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Ok(Json(payload)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "No query provided");
    };
    let Some(query) = payload.get("query") else {
        return error_response(StatusCode::BAD_REQUEST, "No query provided");
    };
    let Some(query) = query.as_str().map(str::trim).filter(|q| !q.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid query format");
    };

    match orchestrator::run_search(query, &state.schema, &state.index, &state.summary).await {
        Ok(results) => match serde_json::to_value(&results) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize results");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "serialization failed")
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "search request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"error": message})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_shape() {
        let (status, Json(body)) = error_response(StatusCode::BAD_REQUEST, "No query provided");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No query provided"}));
    }

    #[test]
    fn app_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
