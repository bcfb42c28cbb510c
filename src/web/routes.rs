use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{api, chat, health, pages};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/bot", get(chat::bot))
        .route("/bot/new", get(chat::new_chat))
        .route("/bot/{chat_id}", get(chat::chat_view).post(chat::submit_topic))

        // JSON endpoints
        .route("/clear-chat-history", post(api::clear_chat_history))
        .route("/delete-chat/{chat_id}", post(api::delete_chat))

        // Health check
        .route("/health", get(health::health_check))

        .with_state(state)
}
