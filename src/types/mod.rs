pub mod chat;
pub mod errors;
pub mod message;
pub mod video;

pub use chat::Chat;
pub use errors::{AppError, SearchError, StoreError};
pub use message::Message;
pub use video::{RawVideo, Video};
