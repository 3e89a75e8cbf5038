use async_trait::async_trait;

use super::{SearchError, TrackFinderStrategy, TrackSearch, query_value, same_artist};
use crate::{types::CandidateTrack, utils};

/// Equality after normalization: featuring credits, bracketed annotations,
/// version suffixes, diacritics, punctuation and a leading "the" are ignored.
///
/// The query itself is sent without annotations, which the catalog's field
/// filters would otherwise have to match literally.
pub struct NormalizedMatch;

#[async_trait]
impl TrackFinderStrategy for NormalizedMatch {
    fn name(&self) -> &'static str {
        "normalized"
    }

    async fn find(
        &self,
        artist: &str,
        title: &str,
        search: &dyn TrackSearch,
    ) -> Result<Option<CandidateTrack>, SearchError> {
        let wanted_title = utils::normalize(title);
        if wanted_title.is_empty() {
            return Ok(None);
        }

        let candidates = search.search(&query_value(artist), &query_value(title)).await?;

        Ok(candidates.into_iter().find(|candidate| {
            utils::normalize(&candidate.title) == wanted_title && same_artist(candidate, artist)
        }))
    }
}
