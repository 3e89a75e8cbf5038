use async_trait::async_trait;

use super::{SearchError, TrackFinderStrategy, TrackSearch, query_value, same_artist};
use crate::{types::CandidateTrack, utils};

/// For stations that announce "title - artist": searches with the fields
/// swapped and accepts a normalized match of the swapped pair.
pub struct SwappedFields;

#[async_trait]
impl TrackFinderStrategy for SwappedFields {
    fn name(&self) -> &'static str {
        "swapped"
    }

    async fn find(
        &self,
        artist: &str,
        title: &str,
        search: &dyn TrackSearch,
    ) -> Result<Option<CandidateTrack>, SearchError> {
        // the input artist is the real title and vice versa
        let wanted_title = utils::normalize(artist);
        if wanted_title.is_empty() {
            return Ok(None);
        }

        let candidates = search.search(&query_value(title), &query_value(artist)).await?;

        Ok(candidates.into_iter().find(|candidate| {
            utils::normalize(&candidate.title) == wanted_title && same_artist(candidate, title)
        }))
    }
}
