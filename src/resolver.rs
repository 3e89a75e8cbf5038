use std::sync::Arc;

use thiserror::Error;

use crate::{
    management::TrackCache,
    matching::{self, SearchError, TrackFinderStrategy, TrackSearch},
};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("track search failed: {0}")]
    Search(#[from] SearchError),
}

/// Cache-first resolution of (artist, title) pairs to catalog track ids.
///
/// A pair is searched against the catalog at most once for the lifetime of
/// the cache: whatever the strategy chain concludes, found or not found, is
/// stored and served from then on. Search failures are returned to the caller
/// and leave the cache untouched, so the pair is retried next time.
///
/// Resolvers are cheap to share behind an `Arc`; every resolver working on the
/// same stations should use the same [`TrackCache`].
pub struct TrackResolver {
    cache: Arc<TrackCache>,
    search: Arc<dyn TrackSearch>,
    strategies: Vec<Box<dyn TrackFinderStrategy>>,
}

impl TrackResolver {
    /// Resolver using [`matching::default_strategies`].
    pub fn new(cache: Arc<TrackCache>, search: Arc<dyn TrackSearch>) -> Self {
        Self::with_strategies(cache, search, matching::default_strategies())
    }

    pub fn with_strategies(
        cache: Arc<TrackCache>,
        search: Arc<dyn TrackSearch>,
        strategies: Vec<Box<dyn TrackFinderStrategy>>,
    ) -> Self {
        Self {
            cache,
            search,
            strategies,
        }
    }

    pub fn cache(&self) -> &Arc<TrackCache> {
        &self.cache
    }

    /// Returns the track id for the pair, or `None` when the catalog has no
    /// acceptable match.
    pub async fn resolve(&self, artist: &str, title: &str) -> Result<Option<String>, ResolveError> {
        if let Some(cached) = self.cache.try_get(artist, title) {
            tracing::debug!(artist, title, found = cached.is_some(), "Served from track cache.");
            return Ok(cached);
        }

        let found = matching::find_in_chain(&self.strategies, artist, title, self.search.as_ref())
            .await?
            .map(|candidate| candidate.external_id);

        if found.is_none() {
            tracing::info!(artist, title, "No catalog match, remembering as not found.");
        }

        self.cache.put(artist, title, found.as_deref());

        // a concurrent resolution may have stored its outcome first; report that one
        Ok(self.cache.try_get(artist, title).unwrap_or(found))
    }
}
