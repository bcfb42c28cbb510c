use serde::{Deserialize, Serialize};

use super::Video;

/// One entry in a chat history, tagged by `type` when serialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    User { text: String },
    Bot { text: String },
    Videos { videos: Vec<Video>, search_query: String },
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::Bot { text: text.into() }
    }

    pub fn videos(videos: Vec<Video>, search_query: impl Into<String>) -> Self {
        Self::Videos {
            videos,
            search_query: search_query.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Bot { .. } => "bot",
            Self::Videos { .. } => "videos",
        }
    }
}
