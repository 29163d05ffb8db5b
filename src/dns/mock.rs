//! In-memory TXT resolver.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::lookup::{DnsLookupResult, TxtResolver};

/// Resolver answering from a fixed table.
///
/// Names are matched case-insensitively without a trailing dot. Unknown names
/// answer `NotFound`. Entries can be delayed to simulate slow servers.
#[derive(Debug, Default)]
pub struct MockResolver {
    answers: HashMap<String, DnsLookupResult>,
    delays: HashMap<String, Duration>,
    queries: AtomicUsize,
}

impl MockResolver {
    /// Creates an empty resolver; every name is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `name` with the given TXT strings.
    pub fn with_txt(self, name: &str, records: &[&str]) -> Self {
        let records = records.iter().map(|r| r.to_string()).collect();
        self.with_result(name, DnsLookupResult::from_records(records))
    }

    /// Answers `name` with an arbitrary outcome.
    pub fn with_result(mut self, name: &str, result: DnsLookupResult) -> Self {
        self.answers.insert(normalize(name), result);
        self
    }

    /// Holds the answer for `name` back by `delay`.
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(normalize(name), delay);
        self
    }

    /// Number of lookups served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl TxtResolver for MockResolver {
    async fn lookup_txt(&self, name: &str) -> DnsLookupResult {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let key = normalize(name);
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        self.answers
            .get(&key)
            .cloned()
            .unwrap_or(DnsLookupResult::NotFound)
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
