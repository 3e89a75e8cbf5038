//! # Spotify Integration Module
//!
//! Catalog access for track resolution. Only the search side of the Spotify Web
//! API is used here; playlist maintenance lives with the station services.
//!
//! ```text
//! TrackResolver / strategy chain
//!          ↓  (TrackSearch)
//! SpotifySearch ── TokenManager (client credentials)
//!          ↓
//! GET /search?type=track   POST /api/token
//! ```
//!
//! ## Authentication
//!
//! Search does not need a user context, so the client uses the client
//! credentials grant: [`crate::management::TokenManager`] exchanges the
//! application's id and secret for an app token, keeps it in memory and renews
//! it four minutes before it expires.
//!
//! ## Error Handling
//!
//! - **Rate limiting**: `429` responses are retried after `Retry-After`
//!   seconds, unless the server asks for more than two minutes
//! - **Gateway errors**: `502` responses are retried after 10 seconds
//! - **Token rejection**: `401` drops the token and requests a new one
//! - Everything else surfaces as a [`crate::matching::SearchError`] so the
//!   resolver never mistakes an outage for "track not found"

mod search;

pub use search::SpotifySearch;
pub use search::build_query;
