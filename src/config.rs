//! Configuration management for radiotracks.
//!
//! Values come from environment variables, optionally seeded from a `.env` file
//! in the platform-specific local data directory (`radiotracks/.env`). Process
//! environment always wins over the file because `dotenv` never overrides
//! variables that are already set.
//!
//! Required values return a [`ConfigError`] when missing; everything else falls
//! back to a default.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

use crate::management::FlushSchedule;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const DEFAULT_SEARCH_PAGES: u32 = 1;
pub const DEFAULT_FIRST_FLUSH_SECS: u64 = 180;
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// Loads environment variables from `radiotracks/.env` in the local data
/// directory.
///
/// The directory is created when it does not exist yet. A missing `.env` file
/// is not an error, the process environment alone may carry the configuration.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/radiotracks/.env`
/// - macOS: `~/Library/Application Support/radiotracks/.env`
/// - Windows: `%LOCALAPPDATA%/radiotracks/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Base directory for everything radiotracks keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radiotracks");
    path
}

/// Client ID of the Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret of the Spotify application (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// Only ever sent to the token endpoint; never log it.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_TOKEN_URL.to_string())
}

/// Market (ISO 3166-1 alpha-2) searches are restricted to, if any.
pub fn spotify_search_market() -> Option<String> {
    env::var("SPOTIFY_SEARCH_MARKET")
        .ok()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Page size of a search request, clamped to what the API accepts (1-50).
pub fn spotify_search_limit() -> Result<u32, ConfigError> {
    let limit = parsed("SPOTIFY_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?;
    Ok(limit.clamp(1, 50))
}

/// Number of result pages a single search call may walk through.
pub fn spotify_search_pages() -> Result<u32, ConfigError> {
    let pages = parsed("SPOTIFY_SEARCH_PAGES", DEFAULT_SEARCH_PAGES)?;
    Ok(pages.max(1))
}

/// Location of the persisted track cache (`TRACK_CACHE_PATH`).
pub fn track_cache_path() -> PathBuf {
    match env::var("TRACK_CACHE_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            let mut path = data_dir();
            path.push("cache/track-cache.json");
            path
        }
    }
}

/// Flush timing of the track cache: 3 minutes until the first write, then
/// every 5 minutes unless overridden.
pub fn flush_schedule() -> Result<FlushSchedule, ConfigError> {
    let first = parsed("TRACK_CACHE_FIRST_FLUSH_SECS", DEFAULT_FIRST_FLUSH_SECS)?;
    let every = parsed("TRACK_CACHE_FLUSH_INTERVAL_SECS", DEFAULT_FLUSH_INTERVAL_SECS)?;

    if every == 0 {
        return Err(ConfigError::Invalid {
            name: "TRACK_CACHE_FLUSH_INTERVAL_SECS",
            value: every.to_string(),
        });
    }

    Ok(FlushSchedule {
        first_delay: Duration::from_secs(first),
        interval: Duration::from_secs(every),
    })
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
