//! JSON endpoints used by the chat page scripts

use crate::services::ChatRegistry;
use crate::state::AppState;
use crate::types::AppError;
use crate::web::session::session_key;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;

pub async fn clear_chat_history(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, key) = session_key(jar);
    let mut registry = ChatRegistry::load(state.sessions.clone(), &key).await?;
    registry.clear_all();
    registry.flush().await?;

    tracing::info!("Cleared chat history for session {}", key);
    Ok((jar, Json(json!({ "success": true }))))
}

pub async fn delete_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, key) = session_key(jar);
    let mut registry = ChatRegistry::load(state.sessions.clone(), &key).await?;
    registry.delete_chat(&chat_id);
    registry.flush().await?;

    tracing::info!("Deleted chat {}", chat_id);
    Ok((jar, Json(json!({ "success": true }))))
}
