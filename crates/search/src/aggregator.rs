//! Cross-source aggregation: debounce, fan-out, stale-response guard.
//!
//! The aggregator is an explicit state machine instead of closures over
//! timer handles. Time comes in from the caller (`Instant` arguments), and
//! every query edit bumps a monotonically increasing token; a dispatch may
//! only commit results while its token is still the session's latest. That
//! also orders two dispatches that happen to carry identical query text.
//!
//! Dispatch is two-phase so hosts can run the fan-out off their event loop:
//! `poll` hands out a [`Dispatch`] once the debounce interval has elapsed,
//! the host calls `run` (anywhere), and `apply` commits the merged buckets
//! if they are still current. Hosts with only local adapters can drive all
//! three phases inline with `tick`.

use std::time::{Duration, Instant};

use crate::adapters::SourceAdapter;
use crate::item::{Category, ResultSet, MAX_RESULTS_PER_CATEGORY};

/// Pause after the last keystroke before adapters are dispatched.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// One debounced fan-out over all adapters.
#[derive(Clone, Debug)]
pub struct Dispatch {
    /// Session token at issue time; `apply` discards on mismatch
    pub token: u64,
    /// Query text captured at issue time
    pub query: String,
}

/// Aggregates all source adapters for one search session.
pub struct SearchAggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    query: String,
    results: ResultSet,
    is_searching: bool,
    debounce: Duration,
    deadline: Option<Instant>,
    token: u64,
}

impl SearchAggregator {
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        let mut agg = Self {
            adapters,
            query: String::new(),
            results: ResultSet::default(),
            is_searching: false,
            debounce: DEBOUNCE,
            deadline: None,
            token: 0,
        };
        agg.results = agg.idle_results();
        agg
    }

    /// Override the debounce interval (tests use zero or tiny values).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Record a query edit. An empty (or whitespace) query returns to the
    /// Idle state immediately: full action list, no pending timer. A
    /// non-empty query (re)starts the debounce timer.
    ///
    /// Either way the token advances, so results from any in-flight
    /// dispatch are dead on arrival.
    pub fn set_query(&mut self, query: &str, now: Instant) {
        self.token += 1;
        self.query = query.to_string();
        if query.trim().is_empty() {
            self.deadline = None;
            self.is_searching = false;
            self.results = self.idle_results();
        } else {
            self.is_searching = true;
            self.deadline = Some(now + self.debounce);
        }
    }

    /// Hand out a dispatch once the debounce interval has elapsed.
    /// Yields at most one dispatch per timer expiry.
    pub fn poll(&mut self, now: Instant) -> Option<Dispatch> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(Dispatch {
            token: self.token,
            query: self.query.clone(),
        })
    }

    /// Fan out over every adapter and join the buckets into one ResultSet.
    /// Adapters absorb their own failures, so this cannot fail - only be
    /// superseded.
    pub fn run(&self, dispatch: &Dispatch) -> ResultSet {
        let mut results = ResultSet::default();
        for adapter in &self.adapters {
            let mut items = adapter.search(&dispatch.query);
            items.truncate(MAX_RESULTS_PER_CATEGORY);
            results.extend(adapter.category(), items);
        }
        results
    }

    /// Commit a finished dispatch. Returns false (and changes nothing) when
    /// the dispatch is stale; the newer in-flight dispatch then owns the
    /// `is_searching` transition.
    pub fn apply(&mut self, dispatch: &Dispatch, results: ResultSet) -> bool {
        if dispatch.token != self.token {
            return false;
        }
        self.results = results;
        self.is_searching = false;
        true
    }

    /// Drive poll/run/apply inline. Returns true when a dispatch settled.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.poll(now) {
            Some(dispatch) => {
                let results = self.run(&dispatch);
                self.apply(&dispatch, results)
            }
            None => false,
        }
    }

    /// Reset to the Idle state: empty query, idle results, no pending
    /// timer. Bumps the token so late applies are no-ops.
    pub fn reset(&mut self) {
        self.token += 1;
        self.query.clear();
        self.deadline = None;
        self.is_searching = false;
        self.results = self.idle_results();
    }

    /// Idle results: the full static action list, other buckets empty.
    fn idle_results(&self) -> ResultSet {
        let mut results = ResultSet::default();
        for adapter in &self.adapters {
            if adapter.category() == Category::Action {
                // Uncapped on purpose: idle is a browse of every command
                results.action = adapter.search("");
            }
        }
        results
    }
}
