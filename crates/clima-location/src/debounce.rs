//! Trailing debounce for the suggestion search box.
//!
//! Modeled as plain state (timer deadline + generation counter) rather than
//! spawned timers, so the policy is testable with a fake clock and the
//! caller decides when to actually poll. Rules:
//!
//! - no query for input shorter than two characters
//! - at most one query per 300ms of typing inactivity, for the newest input
//! - input equal to the last confirmed selection label never queries
//! - a response is dropped unless it belongs to the newest generation

use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(300);
const MIN_QUERY_LEN: usize = 2;

/// A query that is due to be issued, tagged with the generation that must
/// still be current when its response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
struct Scheduled {
    generation: u64,
    query: String,
    fire_at: Instant,
}

/// Debounce state machine for suggestion searches.
#[derive(Debug)]
pub struct SuggestionDebouncer {
    delay: Duration,
    generation: u64,
    scheduled: Option<Scheduled>,
    confirmed_label: Option<String>,
}

impl Default for SuggestionDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionDebouncer {
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE)
    }

    /// Custom delay, used by tests that model time explicitly.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            scheduled: None,
            confirmed_label: None,
        }
    }

    /// Record a keystroke. Every call supersedes whatever was scheduled and
    /// invalidates any response still on the wire.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.generation += 1;

        let query = text.trim();
        let suppressed = query.len() < MIN_QUERY_LEN
            || self.confirmed_label.as_deref() == Some(query);

        if suppressed {
            self.scheduled = None;
            return;
        }

        self.scheduled = Some(Scheduled {
            generation: self.generation,
            query: query.to_string(),
            fire_at: now + self.delay,
        });
    }

    /// Take the query whose quiet period has elapsed, if any. Returns each
    /// scheduled query at most once.
    pub fn poll(&mut self, now: Instant) -> Option<PendingQuery> {
        match &self.scheduled {
            Some(s) if now >= s.fire_at => {
                let s = self.scheduled.take()?;
                Some(PendingQuery {
                    generation: s.generation,
                    query: s.query,
                })
            }
            _ => None,
        }
    }

    /// Filter a resolved response: `Some` only when no newer input has been
    /// typed since the query fired. Stale responses are discarded whole,
    /// never merged.
    pub fn accept<T>(&self, generation: u64, results: T) -> Option<T> {
        (generation == self.generation).then_some(results)
    }

    /// Record a confirmed selection. Re-typing the exact label will not
    /// re-query, and any in-flight search result is invalidated.
    pub fn confirm(&mut self, label: &str) {
        self.generation += 1;
        self.scheduled = None;
        self.confirmed_label = Some(label.to_string());
    }
}
