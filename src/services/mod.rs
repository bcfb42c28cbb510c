pub mod conversation;
pub mod filter;
mod metrics;
pub mod registry;
pub mod search;
pub mod session;
pub mod template;

pub use metrics::{MetricsService, MetricsStats};
pub use registry::ChatRegistry;
pub use search::VideoSearchService;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use template::TemplateEngine;
