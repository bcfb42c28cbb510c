//! Counters for search activity

use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct MetricsService {
    searches: AtomicUsize,
    videos_returned: AtomicUsize,
    videos_kept: AtomicUsize,
    total_latency_ms: AtomicU64,
    start_time: Instant,
}

impl MetricsService {
    pub fn new() -> Self {
        Self {
            searches: AtomicUsize::new(0),
            videos_returned: AtomicUsize::new(0),
            videos_kept: AtomicUsize::new(0),
            total_latency_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_search(&self, latency: Duration, returned: usize, kept: usize) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.videos_returned.fetch_add(returned, Ordering::Relaxed);
        self.videos_kept.fetch_add(kept, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsStats {
        let searches = self.searches.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        MetricsStats {
            searches,
            videos_returned: self.videos_returned.load(Ordering::Relaxed),
            videos_kept: self.videos_kept.load(Ordering::Relaxed),
            avg_search_latency_ms: if searches > 0 { total_latency / searches as u64 } else { 0 },
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsStats {
    pub searches: usize,
    pub videos_returned: usize,
    pub videos_kept: usize,
    pub avg_search_latency_ms: u64,
    pub uptime_seconds: u64,
}
