//! # CLI Module
//!
//! User-facing commands of radiotracks. Each command wires the library pieces
//! together (configuration, track cache, Spotify search, resolver), reports
//! progress with the colored output macros and tables, and makes sure the
//! cache flusher is shut down before the process exits so nothing resolved
//! during the run is lost.
//!
//! ## Commands
//!
//! - [`resolve`] - Resolves a single artist/title pair
//! - [`batch`] - Resolves a scraped playlist (JSON array of entries) concurrently
//! - [`cache_stats`], [`cache_list`], [`cache_export`] - Inspect the persisted cache
//!
//! ## Usage Patterns
//!
//! ```bash
//! radiotracks resolve --artist "Kult" --title "Arahja"
//! radiotracks batch playlist-2024-03-01.json --missing
//! radiotracks cache list --search kult
//! radiotracks cache export backup.json
//! ```

mod batch;
mod cache;
mod resolve;

use std::sync::Arc;

use crate::{
    Res, config,
    management::{CacheFlusher, TrackCache},
    resolver::TrackResolver,
    spotify::SpotifySearch,
};

pub use batch::batch;
pub use cache::cache_export;
pub use cache::cache_list;
pub use cache::cache_stats;
pub use resolve::resolve;

/// A resolver together with the flusher persisting its cache.
struct Session {
    resolver: Arc<TrackResolver>,
    flusher: CacheFlusher,
}

/// Reads the configuration, opens the cache and starts its flusher.
///
/// Configuration is validated before the cache is touched, so a failure here
/// never leaves a running flusher behind.
async fn start_session() -> Res<Session> {
    let search = SpotifySearch::from_env()?;
    let schedule = config::flush_schedule()?;

    let cache = Arc::new(TrackCache::load(config::track_cache_path()).await);
    let flusher = CacheFlusher::start(Arc::clone(&cache), schedule);
    let resolver = Arc::new(TrackResolver::new(cache, Arc::new(search)));

    Ok(Session { resolver, flusher })
}

fn display_track(track: &Option<String>) -> String {
    match track {
        Some(id) => format!("spotify:track:{}", id),
        None => "-".to_string(),
    }
}
