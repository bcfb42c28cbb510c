//! Chat page handlers

use crate::services::{conversation, ChatRegistry};
use crate::state::{AppState, TOPICS};
use crate::types::AppError;
use crate::web::session::{found, session_key};
use axum::{
    extract::{rejection::FormRejection, Form, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use minijinja::context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatViewQuery {
    scroll_to_results: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    topic: Option<String>,
}

/// Entry point: make sure the session has a chat list, then open a new chat
pub async fn bot(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, key) = session_key(jar);
    let mut registry = ChatRegistry::load(state.sessions.clone(), &key).await?;
    registry.ensure_list();
    registry.flush().await?;

    Ok((jar, found("/bot/new")))
}

pub async fn new_chat(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, key) = session_key(jar);
    let mut registry = ChatRegistry::load(state.sessions.clone(), &key).await?;
    let chat = registry.create_chat();
    registry.flush().await?;

    tracing::info!("Created chat {}", chat.id);
    Ok((jar, found(&format!("/bot/{}", chat.id))))
}

pub async fn chat_view(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Query(query): Query<ChatViewQuery>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Response), AppError> {
    let (jar, key) = session_key(jar);
    let registry = ChatRegistry::load(state.sessions.clone(), &key).await?;

    // Unknown chats never 404; start a fresh one instead
    let Some(chat) = registry.get_chat(&chat_id) else {
        tracing::debug!("Chat {} not found, redirecting to a new chat", chat_id);
        return Ok((jar, found("/bot/new")));
    };

    let scroll_to_results = query
        .scroll_to_results
        .is_some_and(|value| !value.is_empty());

    let html = state.templates.render(
        "bot.html",
        context! {
            topics => TOPICS,
            chat_history => chat.history,
            active_chat_id => chat.id,
            all_chats => registry.list_chats(),
            scroll_to_results => scroll_to_results,
        },
    )?;

    Ok((jar, Html(html).into_response()))
}

pub async fn submit_topic(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    jar: SignedCookieJar,
    form: Result<Form<TopicForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (jar, key) = session_key(jar);
    let mut registry = ChatRegistry::load(state.sessions.clone(), &key).await?;

    let Some(mut chat) = registry.get_chat(&chat_id) else {
        return Ok((jar, found("/bot/new")));
    };

    // A missing or unreadable body is treated as an empty topic
    let topic = match form {
        Ok(Form(form)) => form.topic.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!("Ignoring topic form: {}", rejection);
            String::new()
        }
    };
    if topic.is_empty() {
        return Ok((jar, found(&format!("/bot/{}", chat.id))));
    }

    tracing::info!("Topic '{}' submitted to chat {}", topic, chat.id);
    conversation::submit_topic(&mut registry, &state.search, &state.metrics, &mut chat, &topic).await;
    registry.flush().await?;

    Ok((jar, found(&format!("/bot/{}?scroll_to_results=True", chat.id))))
}
