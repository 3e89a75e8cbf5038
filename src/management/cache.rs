use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    types::{CacheEntry, CacheStats},
    utils,
};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Content-addressed store of resolution outcomes, positive and negative.
///
/// Keys are derived from the (artist, title) pair with [`utils::hash_track`].
/// The map is safe to share between concurrently running resolutions; callers
/// never lock anything themselves. An entry is written once and never updated
/// or removed.
///
/// The in-memory map is mirrored to a single JSON file. Loading is best-effort
/// and writing only happens through [`TrackCache::flush`] (usually driven by a
/// [`super::CacheFlusher`]), never on every mutation.
#[derive(Debug)]
pub struct TrackCache {
    entries: DashMap<Uuid, CacheEntry>,
    path: PathBuf,
    dirty: AtomicBool,
    // one writer at a time, they share the temp file
    write_lock: Mutex<()>,
}

impl TrackCache {
    /// Empty cache that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: DashMap::new(),
            path: path.into(),
            dirty: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the cache persisted at `path`.
    ///
    /// A missing file gives an empty cache. An unreadable or malformed file is
    /// logged and also gives an empty cache: the content is only an
    /// optimization and gets rebuilt by resolving again.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let cache = Self::new(path);

        match read_snapshot(&cache.path).await {
            Ok(Some(snapshot)) => {
                for (key, entry) in snapshot {
                    cache.entries.insert(key, entry);
                }
                tracing::info!(
                    path = %cache.path.display(),
                    "Track cache loaded with {} elements.",
                    cache.entries.len()
                );
            }
            Ok(None) => {
                tracing::info!(path = %cache.path.display(), "No track cache file yet, starting empty.");
            }
            Err(e) => {
                tracing::error!(
                    path = %cache.path.display(),
                    error = %e,
                    "Something went wrong during cache deserialization, starting empty."
                );
            }
        }

        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a pair.
    ///
    /// `None` means the pair was never seen. `Some(None)` is a memoized
    /// negative: it was searched before and nothing matched.
    pub fn try_get(&self, artist: &str, title: &str) -> Option<Option<String>> {
        self.entries
            .get(&utils::hash_track(artist, title))
            .map(|entry| entry.resolved_id())
    }

    pub fn contains(&self, artist: &str, title: &str) -> bool {
        self.entries.contains_key(&utils::hash_track(artist, title))
    }

    /// Records the outcome for a pair unless one is already stored.
    ///
    /// Returns `true` when this call inserted the entry. A second `put` for the
    /// same key is a silent no-op, the first write wins.
    pub fn put(&self, artist: &str, title: &str, track_id: Option<&str>) -> bool {
        let key = utils::hash_track(artist, title);

        let inserted = match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(CacheEntry {
                    artist_name: artist.to_string(),
                    track_name: title.to_string(),
                    track_id: track_id.map(str::to_string),
                });
                true
            }
        };

        // entry guard must be gone before len()
        if inserted {
            self.dirty.store(true, Ordering::Release);
            tracing::info!(
                artist,
                title,
                "Track added to cache. Cache contains {} elements.",
                self.entries.len()
            );
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy of the whole map, ordered by key.
    ///
    /// Shards are read one after another, so puts racing with the snapshot may
    /// or may not be part of it.
    pub fn snapshot(&self) -> BTreeMap<Uuid, CacheEntry> {
        self.entries
            .iter()
            .map(|item| (*item.key(), item.value().clone()))
            .collect()
    }

    /// All entries sorted by artist, then title.
    pub fn entries(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self.snapshot().into_values().collect();
        entries.sort_by(|a, b| {
            a.artist_name
                .to_lowercase()
                .cmp(&b.artist_name.to_lowercase())
                .then_with(|| a.track_name.to_lowercase().cmp(&b.track_name.to_lowercase()))
        });
        entries
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        for item in self.entries.iter() {
            stats.total += 1;
            if item.value().resolved_id().is_some() {
                stats.resolved += 1;
            } else {
                stats.negative += 1;
            }
        }
        stats
    }

    /// Pretty-printed JSON of the current snapshot, keyed by the key's string form.
    pub fn to_json(&self) -> Result<String, CacheError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Writes the snapshot to the backing file, replacing its previous content.
    pub async fn flush(&self) -> Result<(), CacheError> {
        self.dirty.store(false, Ordering::Release);

        match self.write_to(&self.path).await {
            Ok(count) => {
                tracing::info!(path = %self.path.display(), count, "Cache content has been serialized.");
                Ok(())
            }
            Err(e) => {
                // keep the changes pending for the next attempt
                self.dirty.store(true, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Like [`TrackCache::flush`], but skips the write when nothing was added
    /// since the last successful flush. Returns whether a write happened.
    pub async fn flush_if_dirty(&self) -> Result<bool, CacheError> {
        if !self.dirty.load(Ordering::Acquire) {
            tracing::debug!(path = %self.path.display(), "Track cache unchanged, skipping flush.");
            return Ok(false);
        }
        self.flush().await.map(|_| true)
    }

    /// Writes the snapshot to an arbitrary file and returns the number of entries written.
    pub async fn export(&self, path: &Path) -> Result<usize, CacheError> {
        self.write_to(path).await
    }

    async fn write_to(&self, path: &Path) -> Result<usize, CacheError> {
        let _writer = self.write_lock.lock().await;
        let snapshot = self.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        // write next to the target and rename, a crash mid-write leaves the old file intact
        let tmp_path = temp_path(path);
        async_fs::write(&tmp_path, json).await?;
        async_fs::rename(&tmp_path, path).await?;

        Ok(snapshot.len())
    }
}

async fn read_snapshot(path: &Path) -> Result<Option<BTreeMap<Uuid, CacheEntry>>, CacheError> {
    let content = match async_fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CacheError::Io(e)),
    };

    let snapshot = serde_json::from_str(&content)?;
    Ok(Some(snapshot))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "track-cache.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
