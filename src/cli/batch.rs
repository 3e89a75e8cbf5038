use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res, error, info, success,
    types::{PlaylistEntry, TrackTableRow},
    utils, warning,
};

use super::{display_track, start_session};

/// Resolves every entry of a scraped playlist file.
///
/// The file holds a JSON array of `{ "artist": ..., "title": ... }` objects
/// (extra fields such as `played_at` are allowed). Entries mapping to the same
/// cache key are resolved once.
///
/// # Concurrency
///
/// Entries are processed in chunks of `chunk_size`; all entries of a chunk are
/// resolved concurrently on their own tasks and share one resolver and cache.
/// Keeping chunks small keeps the burst of search requests against Spotify
/// bounded.
///
/// # Output
///
/// A table of artist, title and track URI (only the unresolved rows with
/// `only_missing`) followed by a summary line. Entries whose search failed
/// are reported as warnings and are not cached, so a rerun retries them.
pub async fn batch(file: PathBuf, only_missing: bool, chunk_size: usize) {
    let mut entries = match read_entries(&file).await {
        Ok(entries) => entries,
        Err(e) => error!("Cannot read playlist file {}. Err: {}", file.display(), e),
    };

    utils::remove_duplicate_entries(&mut entries);
    if entries.is_empty() {
        warning!("Playlist file {} has no entries", file.display());
        return;
    }

    let session = match start_session().await {
        Ok(session) => session,
        Err(e) => error!("Cannot start resolver. Err: {}", e),
    };

    info!("Resolving {} playlist entries", entries.len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> "),
    );
    pb.set_message("Resolving tracks...");

    let mut rows: Vec<TrackTableRow> = Vec::new();
    let mut resolved = 0;
    let mut not_found = 0;
    let mut failed = 0;

    for chunk in entries.chunks(chunk_size.max(1)) {
        let mut handles = Vec::new();

        for entry in chunk.iter().cloned() {
            let resolver = Arc::clone(&session.resolver);
            let handle = tokio::spawn(async move {
                let outcome = resolver.resolve(&entry.artist, &entry.title).await;
                (entry, outcome)
            });
            handles.push(handle);
        }

        for handle in handles {
            match handle.await {
                Ok((entry, Ok(track))) => {
                    if track.is_some() {
                        resolved += 1;
                    } else {
                        not_found += 1;
                    }

                    if !only_missing || track.is_none() {
                        rows.push(TrackTableRow {
                            artist: entry.artist,
                            title: entry.title,
                            track: display_track(&track),
                        });
                    }
                }
                Ok((entry, Err(e))) => {
                    failed += 1;
                    pb.suspend(|| {
                        warning!(
                            "Failed to resolve '{}' - '{}': {}",
                            entry.artist,
                            entry.title,
                            e
                        )
                    });
                }
                Err(e) => {
                    failed += 1;
                    pb.suspend(|| warning!("Task join error: {}", e));
                }
            }
            pb.inc(1);
        }
    }

    pb.finish_and_clear();
    session.flusher.shutdown().await;

    if !rows.is_empty() {
        utils::sort_track_table_rows(&mut rows);
        let table = Table::new(rows);
        println!("{}", table);
    }

    success!(
        "{} resolved, {} not found on Spotify, {} failed",
        resolved,
        not_found,
        failed
    );
}

async fn read_entries(file: &Path) -> Res<Vec<PlaylistEntry>> {
    let content = async_fs::read_to_string(file).await?;
    let entries: Vec<PlaylistEntry> = serde_json::from_str(&content)?;
    Ok(entries)
}
