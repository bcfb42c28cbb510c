//! Chat records stored per browser session

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Message;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub history: Vec<Message>,
}

impl Chat {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now.duration_trunc(TimeDelta::minutes(1)).unwrap_or(now),
            history: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.history.push(message);
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}
