use serde::{Deserialize, Serialize};

/// A search result before filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawVideo {
    pub title: String,
    pub link: Option<String>,
}

/// A filtered result ready for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub link: Option<String>,
    pub video_id: Option<String>,
    pub thumbnail: String,
}
