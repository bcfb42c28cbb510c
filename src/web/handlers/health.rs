//! Health check endpoint

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let sessions = match state.sessions.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("Session count unavailable: {}", e);
            None
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "edutube-bot",
            "version": env!("CARGO_PKG_VERSION"),
            "sessions": sessions,
            "metrics": state.metrics.get_stats(),
        })),
    )
}
