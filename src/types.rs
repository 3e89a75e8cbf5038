use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Renew a token this many seconds before it actually expires.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Whether the token is expired or expires within [`TOKEN_EXPIRY_MARGIN_SECS`].
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        now + TOKEN_EXPIRY_MARGIN_SECS >= self.obtained_at + self.expires_in
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

/// One row of the persisted track cache.
///
/// `track_id` is `None` (or an empty string in hand-edited files) when the pair
/// was searched and nothing acceptable was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub artist_name: String,
    pub track_name: String,
    #[serde(default)]
    pub track_id: Option<String>,
}

impl CacheEntry {
    pub fn resolved_id(&self) -> Option<String> {
        self.track_id.clone().filter(|id| !id.is_empty())
    }
}

/// A search hit returned by the catalog, not yet accepted as the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTrack {
    pub external_id: String,
    pub artist: String,
    pub title: String,
}

impl CandidateTrack {
    pub fn new(external_id: &str, artist: &str, title: &str) -> Self {
        Self {
            external_id: external_id.to_string(),
            artist: artist.to_string(),
            title: title.to_string(),
        }
    }
}

/// A scraped playlist entry as produced by the station data sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub artist: String,
    pub title: String,
    #[serde(default)]
    pub played_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<SearchTrack>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

impl From<SearchTrack> for CandidateTrack {
    fn from(track: SearchTrack) -> Self {
        let artist = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        CandidateTrack {
            external_id: track.id,
            artist,
            title: track.name,
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub artist: String,
    pub title: String,
    pub track: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub resolved: usize,
    pub negative: usize,
}
