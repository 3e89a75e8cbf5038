use std::{cmp::Ordering, collections::HashSet, sync::LazyLock};

use regex::Regex;
use sha2::{Digest, Sha256};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use uuid::Uuid;

use crate::types::{PlaylistEntry, TrackTableRow};

static FEATURING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\(\[]\s*(?:feat\.?|ft\.?|featuring)\s+[^)\]]*[\)\]]|\s+(?:feat\.?|ft\.?|featuring)\s+.*$")
        .expect("featuring pattern is valid")
});

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\(\[][^)\]]*[\)\]]").expect("bracket pattern is valid"));

static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+[-–—]\s+[^-–—]*\b(?:remaster(?:ed)?|live|edit|version|mix|mono|stereo)\b.*$")
        .expect("version suffix pattern is valid")
});

static ARTIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|&|/|\+|;|\s+x\s+|\s+vs\.?\s+|\s+feat\.?\s+|\s+ft\.?\s+|\s+featuring\s+)\s*")
        .expect("artist separator pattern is valid")
});

/// Derives the cache key of an (artist, title) pair.
///
/// Artist and title are concatenated without a separator, lowercased and the
/// first 16 bytes of the SHA-256 digest of the UTF-8 bytes form the key. No
/// whitespace or punctuation normalization happens here: changing that would
/// orphan every entry already persisted.
pub fn hash_track(artist: &str, title: &str) -> Uuid {
    let folded = format!("{}{}", artist, title).to_lowercase();
    let digest = Sha256::digest(folded.as_bytes());

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

/// Removes featuring credits, bracketed annotations and version suffixes
/// ("- Remastered 2009", "- Radio Edit") while keeping the original casing.
pub fn strip_annotations(value: &str) -> String {
    let value = FEATURING.replace_all(value, "");
    let value = BRACKETED.replace_all(&value, "");
    let value = VERSION_SUFFIX.replace_all(&value, "");
    collapse_whitespace(&value)
}

/// Comparison form of a free-text field: annotations stripped, diacritics
/// folded, lowercased, punctuation dropped and a leading "the" removed.
pub fn normalize(value: &str) -> String {
    let stripped = strip_annotations(value);
    let folded: String = stripped
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let collapsed = collapse_whitespace(&folded);
    match collapsed.strip_prefix("the ") {
        Some(rest) => rest.to_string(),
        None => collapsed,
    }
}

/// Splits a credit line such as "Artist A, Artist B feat. C" into names.
pub fn split_artists(value: &str) -> Vec<String> {
    ARTIST_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// First credited artist of a credit line, or the whole line when it cannot
/// be split.
pub fn primary_artist(value: &str) -> String {
    split_artists(value)
        .into_iter()
        .next()
        .unwrap_or_else(|| value.trim().to_string())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops playlist entries that map to the same cache key, keeping the first.
pub fn remove_duplicate_entries(entries: &mut Vec<PlaylistEntry>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(hash_track(&entry.artist, &entry.title)));
}

pub fn sort_track_table_rows(rows: &mut [TrackTableRow]) {
    rows.sort_by(|a, b| {
        match a.artist.to_lowercase().cmp(&b.artist.to_lowercase()) {
            Ordering::Equal => a.title.to_lowercase().cmp(&b.title.to_lowercase()), // secondary sort: title ascending
            other => other,
        }
    });
}
