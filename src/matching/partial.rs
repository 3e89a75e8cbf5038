use async_trait::async_trait;

use super::{SearchError, TrackFinderStrategy, TrackSearch, candidate_artists, query_value};
use crate::{types::CandidateTrack, utils};

/// Containment instead of equality: the words of one normalized title must
/// appear as a contiguous run in the other, and the same goes for the primary
/// input artist and one credited artist. Partial words never count, "air" is
/// not found in "fair warning".
///
/// Queries only the primary artist, which finds tracks whose credit line on
/// air lists more (or differently spelled) collaborators than the catalog.
pub struct PartialMatch;

#[async_trait]
impl TrackFinderStrategy for PartialMatch {
    fn name(&self) -> &'static str {
        "partial"
    }

    async fn find(
        &self,
        artist: &str,
        title: &str,
        search: &dyn TrackSearch,
    ) -> Result<Option<CandidateTrack>, SearchError> {
        let primary = utils::primary_artist(artist);
        let wanted_artist = utils::normalize(&primary);
        let wanted_title = utils::normalize(title);
        if wanted_artist.is_empty() || wanted_title.is_empty() {
            return Ok(None);
        }

        let candidates = search.search(&primary, &query_value(title)).await?;

        Ok(candidates.into_iter().find(|candidate| {
            overlaps(&utils::normalize(&candidate.title), &wanted_title)
                && candidate_artists(candidate)
                    .iter()
                    .any(|name| overlaps(name, &wanted_artist))
        }))
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    let a: Vec<&str> = a.split_whitespace().collect();
    let b: Vec<&str> = b.split_whitespace().collect();
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    long.windows(short.len()).any(|window| window == short.as_slice())
}
