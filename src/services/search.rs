//! Video search gateway (SerpApi YouTube engine)

use crate::config::Config;
use crate::types::{RawVideo, SearchError};
use serde::Deserialize;
use std::time::Duration;

pub const MAX_RESULTS: usize = 15;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    video_results: Option<Vec<ProviderVideo>>,
}

#[derive(Debug, Deserialize)]
struct ProviderVideo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<ProviderVideo> for RawVideo {
    fn from(video: ProviderVideo) -> Self {
        let link = video
            .link
            .filter(|l| !l.is_empty())
            .or(video.url.filter(|u| !u.is_empty()));
        Self {
            title: video.title.unwrap_or_default(),
            link,
        }
    }
}

pub struct VideoSearchService {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VideoSearchService {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.search_endpoint.clone(),
            config.search_api_key.clone(),
            config.search_timeout,
        )
    }

    /// Never fails: any upstream problem is logged and reported as no results.
    pub async fn search(&self, topic: &str) -> Vec<RawVideo> {
        match self.try_search(topic).await {
            Ok(videos) => {
                tracing::info!("[SEARCH] '{}' returned {} videos", topic, videos.len());
                videos
            }
            Err(e) => {
                tracing::warn!("[SEARCH] '{}' degraded to no results: {}", topic, e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, topic: &str) -> Result<Vec<RawVideo>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("engine", "youtube"),
                ("search_query", topic),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let body: SearchResponse = serde_json::from_slice(&bytes)?;
        Ok(body
            .video_results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RESULTS)
            .map(RawVideo::from)
            .collect())
    }
}
