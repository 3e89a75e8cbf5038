use async_trait::async_trait;

use super::{SearchError, TrackFinderStrategy, TrackSearch};
use crate::{types::CandidateTrack, utils};

/// Title and one credited artist equal to the input, ignoring case only.
pub struct ExactMatch;

#[async_trait]
impl TrackFinderStrategy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    async fn find(
        &self,
        artist: &str,
        title: &str,
        search: &dyn TrackSearch,
    ) -> Result<Option<CandidateTrack>, SearchError> {
        let wanted_artist = artist.trim().to_lowercase();
        let wanted_title = title.trim().to_lowercase();

        let candidates = search.search(artist, title).await?;

        Ok(candidates.into_iter().find(|candidate| {
            candidate.title.trim().to_lowercase() == wanted_title
                && (candidate.artist.trim().to_lowercase() == wanted_artist
                    || utils::split_artists(&candidate.artist)
                        .iter()
                        .any(|name| name.to_lowercase() == wanted_artist))
        }))
    }
}
