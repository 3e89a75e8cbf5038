//! # Matching Module
//!
//! Turns free-text station metadata into a single catalog track. Station
//! playlists rarely carry the catalog's canonical spelling: featured artists
//! get appended, artist and title swap places, diacritics disappear. One exact
//! query misses a lot, so matching is a chain of strategies that goes from
//! strict to permissive:
//!
//! ```text
//! ExactMatch -> NormalizedMatch -> PartialMatch -> SwappedFields
//! ```
//!
//! Every strategy issues one search call through the [`TrackSearch`]
//! capability (with its own choice of query fields) and either accepts one
//! candidate or reports no match. It never guesses.
//!
//! The search capability is injected rather than being a concrete client, so
//! the chain runs the same against the Spotify client and a scripted fake.

mod exact;
mod normalized;
mod partial;
mod swapped;

use async_trait::async_trait;
use thiserror::Error;

use crate::{config::ConfigError, types::CandidateTrack, utils};

pub use exact::ExactMatch;
pub use normalized::NormalizedMatch;
pub use partial::PartialMatch;
pub use swapped::SwappedFields;

/// Infrastructure failure of a search call. Never a "not found".
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("search unavailable: {0}")]
    Unavailable(String),
}

/// Capability: given an artist and a title, return catalog candidates.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    async fn search(&self, artist: &str, title: &str) -> Result<Vec<CandidateTrack>, SearchError>;
}

/// One matching heuristic of the chain.
#[async_trait]
pub trait TrackFinderStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs one search and picks the best acceptable candidate, if any.
    async fn find(
        &self,
        artist: &str,
        title: &str,
        search: &dyn TrackSearch,
    ) -> Result<Option<CandidateTrack>, SearchError>;
}

/// The chain in priority order.
pub fn default_strategies() -> Vec<Box<dyn TrackFinderStrategy>> {
    vec![
        Box::new(ExactMatch),
        Box::new(NormalizedMatch),
        Box::new(PartialMatch),
        Box::new(SwappedFields),
    ]
}

/// Runs `strategies` in order and returns the first candidate one of them accepts.
///
/// `Ok(None)` means every strategy looked and none matched. A search error
/// aborts the chain right away, later strategies are not tried.
pub async fn find_in_chain(
    strategies: &[Box<dyn TrackFinderStrategy>],
    artist: &str,
    title: &str,
    search: &dyn TrackSearch,
) -> Result<Option<CandidateTrack>, SearchError> {
    for strategy in strategies {
        if let Some(candidate) = strategy.find(artist, title, search).await? {
            tracing::debug!(
                strategy = strategy.name(),
                artist,
                title,
                track_id = %candidate.external_id,
                "Track matched."
            );
            return Ok(Some(candidate));
        }
        tracing::debug!(strategy = strategy.name(), artist, title, "No match.");
    }

    Ok(None)
}

/// Normalized names credited on a candidate: the whole credit line plus each
/// individual artist.
fn candidate_artists(candidate: &CandidateTrack) -> Vec<String> {
    let mut names = vec![utils::normalize(&candidate.artist)];
    names.extend(
        utils::split_artists(&candidate.artist)
            .iter()
            .map(|name| utils::normalize(name)),
    );
    names.retain(|name| !name.is_empty());
    names.dedup();
    names
}

/// Whether `wanted` names one of the candidate's artists after normalization.
/// Both the full input credit and its primary artist are tried.
fn same_artist(candidate: &CandidateTrack, wanted: &str) -> bool {
    let full = utils::normalize(wanted);
    let primary = utils::normalize(&utils::primary_artist(wanted));

    candidate_artists(candidate)
        .iter()
        .any(|name| (!full.is_empty() && *name == full) || (!primary.is_empty() && *name == primary))
}

/// Query value with annotations removed, or the raw value when stripping
/// would leave nothing.
fn query_value(value: &str) -> String {
    let stripped = utils::strip_annotations(value);
    if stripped.is_empty() {
        value.trim().to_string()
    } else {
        stripped
    }
}
