//! Palette session facade.
//!
//! One `Palette` owns the whole search session: the aggregator, the
//! keyboard selection, and the recency list. Hosts feed it raw input
//! (keystrokes, Tab, Enter, Escape) and read back display state; the
//! only thing that leaves the palette is a [`NavigateTo`] on commit.

use std::time::Instant;

use crate::adapters::SourceAdapter;
use crate::aggregator::{Dispatch, SearchAggregator};
use crate::item::{Category, NavigateTo, ResultSet, SearchItem};
use crate::recent::{RecentList, RecentStore};
use crate::selection::Selection;

/// Strip a leading category sigil from the raw input.
/// `"@acme"` becomes `("acme", Some(Account))`; unsigiled input passes
/// through unchanged.
pub fn parse_prefix(raw: &str) -> (&str, Option<Category>) {
    let mut chars = raw.chars();
    match chars.next().and_then(Category::from_prefix) {
        Some(category) => (chars.as_str(), Some(category)),
        None => (raw, None),
    }
}

pub struct Palette {
    aggregator: SearchAggregator,
    selection: Selection,
    recent: RecentList,
    /// Raw input including any sigil, as the host should display it
    raw_query: String,
    open: bool,
}

impl Palette {
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>, store: Box<dyn RecentStore>) -> Self {
        Self {
            aggregator: SearchAggregator::new(adapters),
            selection: Selection::new(),
            recent: RecentList::load(store),
            raw_query: String::new(),
            open: false,
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Open a fresh session: empty query, aggregate view, idle results.
    /// The recency list carries over untouched.
    pub fn open(&mut self) {
        self.open = true;
        self.raw_query.clear();
        self.aggregator.reset();
        self.selection.reset();
    }

    /// Dismiss without committing. Leaves no trace in the recency list;
    /// the bumped token kills any in-flight dispatch.
    pub fn cancel(&mut self) {
        self.open = false;
        self.raw_query.clear();
        self.aggregator.reset();
        self.selection.reset();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Record a query edit. A leading sigil scopes the active category and
    /// is stripped before matching; an unsigiled edit keeps whatever
    /// category the user tabbed to.
    pub fn set_query(&mut self, raw: &str, now: Instant) {
        if !self.open {
            return;
        }
        self.raw_query = raw.to_string();
        let (needle, scope) = parse_prefix(raw);
        if let Some(category) = scope {
            self.selection.set_active(category);
        }
        self.selection.reset_index();
        self.aggregator.set_query(needle, now);
    }

    pub fn move_next(&mut self) {
        let count = self.aggregator.results().flat_len(self.selection.active());
        self.selection.move_next(count);
    }

    pub fn move_prev(&mut self) {
        let count = self.aggregator.results().flat_len(self.selection.active());
        self.selection.move_prev(count);
    }

    /// Tab / Shift+Tab through the category views.
    pub fn next_category(&mut self, shift: bool) {
        self.selection.next_category(shift);
    }

    /// Activate the highlighted item: record it as recent, close the
    /// palette, and hand the navigation target to the host. With nothing
    /// under the highlight the palette stays open and nothing happens.
    pub fn commit(&mut self) -> Option<NavigateTo> {
        let item = self
            .flat_results()
            .get(self.selection.index())
            .map(|&i| i.clone())?;
        self.recent.push(item.clone());
        self.open = false;
        self.raw_query.clear();
        self.aggregator.reset();
        self.selection.reset();
        Some(item.navigate)
    }

    // ========================================================================
    // Dispatch plumbing
    // ========================================================================

    /// See [`SearchAggregator::poll`].
    pub fn poll(&mut self, now: Instant) -> Option<Dispatch> {
        if !self.open {
            return None;
        }
        self.aggregator.poll(now)
    }

    /// See [`SearchAggregator::run`]. Safe to call off the event loop.
    pub fn run_dispatch(&self, dispatch: &Dispatch) -> ResultSet {
        self.aggregator.run(dispatch)
    }

    /// Commit settled results. Dropped when the palette closed or the
    /// dispatch went stale while the fan-out ran.
    pub fn apply(&mut self, dispatch: &Dispatch, results: ResultSet) -> bool {
        if !self.open {
            return false;
        }
        let applied = self.aggregator.apply(dispatch, results);
        if applied {
            self.selection.reset_index();
        }
        applied
    }

    /// Drive poll/run/apply inline, for hosts with only local adapters.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.poll(now) {
            Some(dispatch) => {
                let results = self.run_dispatch(&dispatch);
                self.apply(&dispatch, results)
            }
            None => false,
        }
    }

    // ========================================================================
    // Display state
    // ========================================================================

    pub fn query(&self) -> &str {
        &self.raw_query
    }

    pub fn results(&self) -> &ResultSet {
        self.aggregator.results()
    }

    /// The rows the host should render, in order, for the active view.
    pub fn flat_results(&self) -> Vec<&SearchItem> {
        self.aggregator.results().flat(self.selection.active())
    }

    pub fn active_category(&self) -> Category {
        self.selection.active()
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn is_searching(&self) -> bool {
        self.aggregator.is_searching()
    }

    /// Most recent first, at most [`crate::recent::MAX_RECENT`] entries.
    pub fn recent_searches(&self) -> impl Iterator<Item = &SearchItem> {
        self.recent.items()
    }
}
