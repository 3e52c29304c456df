//! Scripted [`RecordSource`] for pipeline tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Feed;
use crate::error::FeedError;
use crate::port::RecordSource;

type Response = Result<String, FeedError>;

#[derive(Default)]
struct FeedScript {
    responses: VecDeque<Response>,
    fetches: usize,
}

/// A source with queued responses per feed label.
///
/// Each `fetch` pops the next queued response; the last one stays in place
/// and is repeated once the queue is down to a single entry. Feeds with no
/// script are unreachable.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, FeedScript>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful body for `label`.
    pub fn push_body(&self, label: &str, body: impl Into<String>) {
        self.push(label, Ok(body.into()));
    }

    /// Queue an unreachable response for `label`.
    pub fn push_unreachable(&self, label: &str) {
        self.push(
            label,
            Err(FeedError::Unreachable {
                feed: label.to_string(),
                reason: "connection refused".to_string(),
            }),
        );
    }

    /// Drop queued responses for `label` and queue `body` instead.
    pub fn replace_body(&self, label: &str, body: impl Into<String>) {
        let mut scripts = self.scripts.lock();
        let script = scripts.entry(label.to_string()).or_default();
        script.responses.clear();
        script.responses.push_back(Ok(body.into()));
    }

    /// Number of fetches made for `label`.
    pub fn fetch_count(&self, label: &str) -> usize {
        self.scripts
            .lock()
            .get(label)
            .map_or(0, |script| script.fetches)
    }

    fn push(&self, label: &str, response: Response) {
        self.scripts
            .lock()
            .entry(label.to_string())
            .or_default()
            .responses
            .push_back(response);
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch(&self, feed: &Feed) -> Result<String, FeedError> {
        let mut scripts = self.scripts.lock();
        let script = scripts.entry(feed.label.clone()).or_default();
        script.fetches += 1;

        let next = if script.responses.len() > 1 {
            script.responses.pop_front()
        } else {
            script.responses.front().cloned()
        };

        next.unwrap_or_else(|| {
            Err(FeedError::Unreachable {
                feed: feed.label.clone(),
                reason: "no scripted response".to_string(),
            })
        })
    }
}
