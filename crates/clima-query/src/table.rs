//! Keyed, cached asynchronous query state.
//!
//! One `QueryTable` per query family; entries are keyed by identity (the
//! endpoint's inputs) and move through `idle -> loading -> success | error`,
//! with success/error going back to loading on refetch. The table is plain
//! state: the caller performs the actual network call between `plan`/
//! `refresh` and `resolve`, which is what makes the ordering rules
//! testable without a runtime.
//!
//! Rules enforced here:
//! - cached data within the staleness window is reused, not refetched
//! - prior data stays visible while a refetch is loading (no flash-to-empty)
//! - a refresh issued while one is in flight coalesces into it
//! - a response only lands if it carries the entry's current in-flight
//!   token; anything superseded is discarded on arrival
//! - an error is recorded per identity and never touches other entries

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

/// Lifecycle state of one query identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the caller should do for a query it wants data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// Cached data is current; no network call.
    Fresh,
    /// Start a fetch and resolve it with this token.
    Start(u64),
    /// A fetch for this identity is already on the wire; wait for it.
    InFlight,
}

#[derive(Debug)]
struct QueryEntry<T> {
    status: QueryStatus,
    data: Option<T>,
    error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    in_flight: Option<u64>,
}

impl<T> Default for QueryEntry<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
            in_flight: None,
        }
    }
}

/// Cache table for one query family, keyed by identity.
#[derive(Debug)]
pub struct QueryTable<K, T> {
    entries: HashMap<K, QueryEntry<T>>,
    stale_after: Option<Duration>,
    next_token: u64,
}

impl<K: Eq + Hash + Clone, T> QueryTable<K, T> {
    /// Table whose successful entries never go stale on their own; they are
    /// replaced only by identity change or explicit refresh.
    pub fn new() -> Self {
        Self::with_staleness(None)
    }

    /// Table whose successful entries are refetched once older than
    /// `stale_after`.
    pub fn with_staleness(stale_after: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            next_token: 0,
        }
    }

    /// Decide whether `key` needs a fetch right now.
    pub fn plan(&mut self, key: K, now: DateTime<Utc>) -> FetchPlan {
        let stale_after = self.stale_after;
        let entry = self.entries.entry(key).or_default();

        if entry.in_flight.is_some() {
            return FetchPlan::InFlight;
        }

        if entry.status == QueryStatus::Success {
            let fresh = match (stale_after, entry.fetched_at) {
                (None, _) => true,
                (Some(window), Some(at)) => now - at < window,
                (Some(_), None) => false,
            };
            if fresh {
                return FetchPlan::Fresh;
            }
        }

        FetchPlan::Start(Self::begin(entry, &mut self.next_token))
    }

    /// Force a refetch even if cached and fresh. Returns `None` when a fetch
    /// for this identity is already in flight - the caller must not issue a
    /// second network call.
    pub fn refresh(&mut self, key: K) -> Option<u64> {
        let entry = self.entries.entry(key).or_default();

        if entry.in_flight.is_some() {
            tracing::debug!("Refresh coalesced into in-flight fetch");
            return None;
        }

        Some(Self::begin(entry, &mut self.next_token))
    }

    fn begin(entry: &mut QueryEntry<T>, next_token: &mut u64) -> u64 {
        *next_token += 1;
        let token = *next_token;
        entry.status = QueryStatus::Loading;
        entry.in_flight = Some(token);
        // Prior data and error are kept until the new result lands.
        token
    }

    /// Land a result. Returns false (and changes nothing) when the token no
    /// longer matches, i.e. the response was superseded.
    pub fn resolve(
        &mut self,
        key: &K,
        token: u64,
        result: Result<T, String>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.in_flight != Some(token) {
            tracing::debug!("Discarding superseded response (token {})", token);
            return false;
        }

        entry.in_flight = None;
        match result {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(data);
                entry.error = None;
                entry.fetched_at = Some(now);
            }
            Err(message) => {
                entry.status = QueryStatus::Error;
                entry.error = Some(message);
                // Last-known-good data stays visible.
            }
        }
        true
    }

    pub fn status(&self, key: &K) -> QueryStatus {
        self.entries
            .get(key)
            .map(|e| e.status)
            .unwrap_or_default()
    }

    pub fn data(&self, key: &K) -> Option<&T> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn error(&self, key: &K) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.error.as_deref())
    }

    pub fn fetched_at(&self, key: &K) -> Option<DateTime<Utc>> {
        self.entries.get(key).and_then(|e| e.fetched_at)
    }
}

impl<K: Eq + Hash + Clone, T> Default for QueryTable<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
