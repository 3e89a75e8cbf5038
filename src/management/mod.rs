mod auth;
mod cache;
mod flusher;

pub use auth::TokenManager;
pub use cache::CacheError;
pub use cache::TrackCache;
pub use flusher::CacheFlusher;
pub use flusher::FlushSchedule;
