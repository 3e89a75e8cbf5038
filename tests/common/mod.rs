#![allow(dead_code)]

use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use radiotracks::{
    matching::{SearchError, TrackSearch},
    types::CandidateTrack,
};

/// Returns the same candidates for every query and records what was asked.
pub struct ScriptedSearch {
    candidates: Vec<CandidateTrack>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    queries: Mutex<Vec<(String, String)>>,
}

impl ScriptedSearch {
    pub fn new(candidates: Vec<CandidateTrack>) -> Self {
        Self {
            candidates,
            delay: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Makes every search take a while, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackSearch for ScriptedSearch {
    async fn search(&self, artist: &str, title: &str) -> Result<Vec<CandidateTrack>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap()
            .push((artist.to_string(), title.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.candidates.clone())
    }
}

/// Fails every call, like an expired credential or a network outage.
pub struct FailingSearch {
    calls: AtomicUsize,
}

impl FailingSearch {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackSearch for FailingSearch {
    async fn search(&self, _artist: &str, _title: &str) -> Result<Vec<CandidateTrack>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::Unavailable("catalog offline".to_string()))
    }
}

pub fn candidate(id: &str, artist: &str, title: &str) -> CandidateTrack {
    CandidateTrack::new(id, artist, title)
}
