use crate::{error, success, warning};

use super::{display_track, start_session};

pub async fn resolve(artist: String, title: String) {
    let session = match start_session().await {
        Ok(session) => session,
        Err(e) => error!("Cannot start resolver. Err: {}", e),
    };

    let cached = session.resolver.cache().contains(&artist, &title);
    let outcome = session.resolver.resolve(&artist, &title).await;
    session.flusher.shutdown().await;

    match outcome {
        Ok(Some(id)) => success!(
            "'{}' - '{}' => {}{}",
            artist,
            title,
            display_track(&Some(id)),
            if cached { " (cached)" } else { "" }
        ),
        Ok(None) => warning!(
            "No Spotify match for '{}' - '{}'{}",
            artist,
            title,
            if cached { " (cached)" } else { "" }
        ),
        Err(e) => error!("Failed to resolve '{}' - '{}'. Err: {}", artist, title, e),
    }
}
