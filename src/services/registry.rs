//! Per-request view over one session's chat list

use super::session::SessionStore;
use crate::types::{Chat, Message, StoreError};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Nothing,
    Save,
    Remove,
}

pub struct ChatRegistry {
    store: Arc<dyn SessionStore>,
    session_key: String,
    chats: Option<Vec<Chat>>,
    pending: Pending,
}

impl ChatRegistry {
    pub async fn load(store: Arc<dyn SessionStore>, session_key: &str) -> Result<Self, StoreError> {
        let chats = store.load(session_key).await?;
        Ok(Self {
            store,
            session_key: session_key.to_string(),
            chats,
            pending: Pending::Nothing,
        })
    }

    pub fn list_chats(&self) -> &[Chat] {
        self.chats.as_deref().unwrap_or_default()
    }

    /// Marks the session as having a chat list. An empty list is never
    /// written out: it reads back the same as a missing one.
    pub fn ensure_list(&mut self) {
        if self.chats.is_none() {
            self.chats = Some(Vec::new());
            self.pending = Pending::Save;
        }
    }

    pub fn create_chat(&mut self) -> Chat {
        let chat = Chat::new();
        self.chats.get_or_insert_with(Vec::new).push(chat.clone());
        self.pending = Pending::Save;
        tracing::debug!("[REGISTRY] Created chat {} for session {}", chat.id, self.session_key);
        chat
    }

    pub fn get_chat(&self, id: &str) -> Option<Chat> {
        self.list_chats().iter().find(|c| c.id == id).cloned()
    }

    /// Pushes onto `chat` and writes it back over the stored chat with the same id.
    pub fn append_message(&mut self, chat: &mut Chat, message: Message) {
        tracing::trace!("[REGISTRY] Appending {} message to chat {}", message.kind(), chat.id);
        chat.add_message(message);
        if let Some(chats) = self.chats.as_mut() {
            for stored in chats.iter_mut().filter(|c| c.id == chat.id) {
                *stored = chat.clone();
            }
        }
        self.pending = Pending::Save;
    }

    pub fn delete_chat(&mut self, id: &str) {
        let chats = self.chats.get_or_insert_with(Vec::new);
        chats.retain(|c| c.id != id);
        self.pending = Pending::Save;
    }

    pub fn clear_all(&mut self) {
        self.chats = None;
        self.pending = Pending::Remove;
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != Pending::Nothing
    }

    /// Writes pending changes back to the session store.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if !self.is_dirty() {
            return Ok(());
        }
        match self.pending {
            // Sessions without chats leave nothing behind in the store
            Pending::Save if self.list_chats().is_empty() => {
                self.store.remove(&self.session_key).await?;
            }
            Pending::Save => {
                self.store
                    .save(&self.session_key, self.list_chats())
                    .await?;
            }
            Pending::Remove => self.store.remove(&self.session_key).await?,
            Pending::Nothing => {}
        }
        self.pending = Pending::Nothing;
        Ok(())
    }
}
