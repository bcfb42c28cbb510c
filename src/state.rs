use crate::config::Config;
use crate::services::{
    FileSessionStore, MemorySessionStore, MetricsService, SessionStore, TemplateEngine,
    VideoSearchService,
};
use anyhow::Result;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

pub const TOPICS: &[&str] = &[
    "Python Basics",
    "Machine Learning",
    "Data Science",
    "Web Development",
    "Artificial Intelligence",
    "Deep Learning",
    "Flask Tutorial",
    "ReactJS Basics",
    "Natural Language Processing",
    "Data Structures",
];

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionStore>,
    pub search: Arc<VideoSearchService>,
    pub templates: Arc<TemplateEngine>,
    pub metrics: Arc<MetricsService>,
    pub cookie_key: Key,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("[STATE] Initializing AppState...");
        tracing::info!("[STATE]   Search endpoint: {}", config.search_endpoint);
        tracing::info!("[STATE]   Search timeout: {:?}", config.search_timeout);

        let sessions: Arc<dyn SessionStore> = match &config.session_dir {
            Some(dir) => Arc::new(FileSessionStore::new(dir).await?),
            None => {
                tracing::info!("[STATE] Using in-memory session store");
                Arc::new(MemorySessionStore::new())
            }
        };

        Self::with_store(config, sessions)
    }

    pub fn with_store(config: Config, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        let cookie_key = match &config.session_secret {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|e| anyhow::anyhow!("invalid SECRET_KEY: {e:?}"))?,
            None => {
                tracing::warn!("[STATE] SECRET_KEY not set; sessions will not survive a restart");
                Key::generate()
            }
        };

        Ok(Self {
            search: Arc::new(VideoSearchService::from_config(&config)?),
            templates: Arc::new(TemplateEngine::new()?),
            metrics: Arc::new(MetricsService::new()),
            config: Arc::new(config),
            sessions,
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
