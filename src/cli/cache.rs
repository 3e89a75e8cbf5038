use std::path::PathBuf;

use tabled::Table;

use crate::{
    config, error, info,
    management::TrackCache,
    success,
    types::{CacheEntry, TrackTableRow},
    warning,
};

use super::display_track;

pub async fn cache_stats() {
    let cache = TrackCache::load(config::track_cache_path()).await;
    let stats = cache.stats();

    info!("Track cache: {}", cache.path().display());
    info!(
        "{} entries, {} resolved, {} not found on Spotify",
        stats.total,
        stats.resolved,
        stats.negative
    );
}

/// Lists cached pairs, optionally filtered.
///
/// `search` matches case-insensitively against artist or title; `only_missing`
/// keeps the memoized negatives, which are the candidates for a manual look.
pub async fn cache_list(search: Option<String>, only_missing: bool) {
    let cache = TrackCache::load(config::track_cache_path()).await;
    let mut entries: Vec<CacheEntry> = cache.entries();

    if let Some(term) = search {
        let term = term.to_lowercase();
        entries.retain(|e| {
            e.artist_name.to_lowercase().contains(&term) || e.track_name.to_lowercase().contains(&term)
        });
    }
    if only_missing {
        entries.retain(|e| e.resolved_id().is_none());
    }

    if entries.is_empty() {
        warning!("No cached tracks found");
        return;
    }

    let count = entries.len();
    let rows: Vec<TrackTableRow> = entries
        .into_iter()
        .map(|e| TrackTableRow {
            track: display_track(&e.resolved_id()),
            artist: e.artist_name,
            title: e.track_name,
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
    info!("{} cached tracks", count);
}

pub async fn cache_export(target: PathBuf) {
    let cache = TrackCache::load(config::track_cache_path()).await;

    match cache.export(&target).await {
        Ok(count) => success!("Exported {} cached tracks to {}", count, target.display()),
        Err(e) => error!("Failed to export track cache. Err: {}", e),
    }
}
