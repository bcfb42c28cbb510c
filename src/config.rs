use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search";

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Search provider
    pub search_api_key: String,
    pub search_endpoint: String,
    pub search_timeout: Duration,

    // Sessions
    pub session_secret: Option<String>,
    pub session_dir: Option<PathBuf>,
    pub session_ttl: Duration,
}

impl Config {
    /// Reads the process environment after loading an optional `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("[CONFIG] Loaded {}", path.display());
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let search_api_key = lookup("KEY").unwrap_or_default();
        if search_api_key.is_empty() {
            tracing::warn!("[CONFIG] KEY is not set; searches will be rejected by the provider");
        }

        let session_secret = lookup("SECRET_KEY").filter(|s| !s.is_empty());
        if let Some(secret) = &session_secret {
            anyhow::ensure!(secret.len() >= 64, "SECRET_KEY must be at least 64 bytes");
        }

        let session_ttl = Duration::from_secs(
            lookup("SESSION_TTL_SECS")
                .unwrap_or_else(|| "604800".to_string())
                .parse()?,
        );
        anyhow::ensure!(!session_ttl.is_zero(), "SESSION_TTL_SECS must be positive");

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()?,

            search_api_key,
            search_endpoint: lookup("SEARCH_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string()),
            search_timeout: Duration::from_secs(
                lookup("SEARCH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "20".to_string())
                    .parse()?,
            ),

            session_secret,
            session_dir: lookup("SESSION_DIR").filter(|s| !s.is_empty()).map(PathBuf::from),
            session_ttl,
        })
    }
}
