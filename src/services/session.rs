//! Session storage for chat lists
//!
//! A session key comes from the signed browser cookie. Each store keeps one
//! serialized chat list per key and always rewrites the list as a whole.
//! Entries idle for longer than the configured TTL (measured from the last
//! write) are dropped by [`spawn_sweeper`].

use crate::types::{Chat, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::RwLock;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` when the session has no chats key yet.
    async fn load(&self, session_key: &str) -> Result<Option<Vec<Chat>>, StoreError>;

    async fn save(&self, session_key: &str, chats: &[Chat]) -> Result<(), StoreError>;

    async fn remove(&self, session_key: &str) -> Result<(), StoreError>;

    /// Number of stored sessions.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Drops sessions last written at least `ttl` ago; returns how many went.
    async fn prune(&self, ttl: Duration) -> Result<usize, StoreError>;
}

/// Runs `prune` on a fixed interval for the lifetime of the process.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, ttl: Duration) -> tokio::task::JoinHandle<()> {
    let period = ttl.clamp(Duration::from_millis(10), Duration::from_secs(600));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match store.prune(ttl).await {
                Ok(0) => {}
                Ok(n) => tracing::info!("[SESSION] Pruned {} idle sessions", n),
                Err(e) => tracing::warn!("[SESSION] Prune failed: {}", e),
            }
        }
    })
}

struct Entry {
    chats: Vec<Chat>,
    written_at: Instant,
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_key: &str) -> Result<Option<Vec<Chat>>, StoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(session_key)
            .map(|entry| entry.chats.clone()))
    }

    async fn save(&self, session_key: &str, chats: &[Chat]) -> Result<(), StoreError> {
        let entry = Entry {
            chats: chats.to_vec(),
            written_at: Instant::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session_key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, session_key: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(session_key);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.read().await.len())
    }

    async fn prune(&self, ttl: Duration) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.written_at.elapsed() < ttl);
        Ok(before - sessions.len())
    }
}

/// One `<session_key>.json` file per session under a directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!("[SESSION] File store at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, session_key: &str) -> PathBuf {
        // Keys are UUIDs from the signed cookie; strip anything else anyway
        let name: String = session_key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    async fn session_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, session_key: &str) -> Result<Option<Vec<Chat>>, StoreError> {
        match tokio::fs::read(self.path_for(session_key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session_key: &str, chats: &[Chat]) -> Result<(), StoreError> {
        let path = self.path_for(session_key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(chats)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, session_key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(session_key)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.session_files().await?.len())
    }

    async fn prune(&self, ttl: Duration) -> Result<usize, StoreError> {
        let now = SystemTime::now();
        let mut pruned = 0;
        for path in self.session_files().await? {
            let modified = tokio::fs::metadata(&path).await?.modified()?;
            // A modification time in the future counts as just written
            let idle = now.duration_since(modified).unwrap_or_default();
            if idle >= ttl {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => pruned += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(pruned)
    }
}
