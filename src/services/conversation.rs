//! Topic submission: search, filter, and append to the chat history

use super::filter::filter_and_enrich;
use super::metrics::MetricsService;
use super::registry::ChatRegistry;
use super::search::VideoSearchService;
use crate::types::{Chat, Message};
use std::time::Instant;

pub fn found_text(topic: &str) -> String {
    format!("Here are educational YouTube videos for '{topic}':")
}

pub fn not_found_text(topic: &str) -> String {
    format!("Sorry, I couldn't find educational videos for '{topic}'. Try another subject!")
}

/// Appends two messages (user, bot) when nothing survives the filter, three otherwise.
/// Returns the number of videos shown.
pub async fn submit_topic(
    registry: &mut ChatRegistry,
    search: &VideoSearchService,
    metrics: &MetricsService,
    chat: &mut Chat,
    topic: &str,
) -> usize {
    registry.append_message(chat, Message::user(topic));

    let started = Instant::now();
    let raw = search.search(topic).await;
    let returned = raw.len();
    let videos = filter_and_enrich(raw);
    metrics.record_search(started.elapsed(), returned, videos.len());
    tracing::debug!("[CHAT] Kept {}/{} videos for '{}'", videos.len(), returned, topic);

    let shown = videos.len();
    if videos.is_empty() {
        registry.append_message(chat, Message::bot(not_found_text(topic)));
    } else {
        registry.append_message(chat, Message::bot(found_text(topic)));
        registry.append_message(chat, Message::videos(videos, topic));
    }
    shown
}
