//! Incremental command search for the Ledgerdesk admin shell.
//!
//! Everything the palette can find reduces to one item shape, and every
//! source sits behind the same adapter trait, so the aggregator does not
//! care whether results come from an in-memory record cache or the API.
//!
//! Design principles:
//! - Results are data, not closures: committing an item yields a
//!   [`NavigateTo`] the host interprets, which keeps items serializable
//!   and the recency list persistable.
//! - No clock reads and no timers inside the engine: callers pass
//!   `Instant`s in, so debounce and staleness are deterministic in tests.
//! - A monotonic dispatch token orders responses; late results for an
//!   abandoned query can never overwrite fresher ones.
//! - Sources absorb their own failures. A dead API never breaks local
//!   search; the bucket just comes back empty.

pub mod actions;
pub mod adapters;
pub mod aggregator;
pub mod filter;
pub mod item;
pub mod palette;
pub mod recent;
pub mod selection;

pub use actions::ActionId;
pub use adapters::{
    AccountAdapter, AccountLookup, ActionAdapter, CompanyAdapter, ProductAdapter,
    QuotationAdapter, RawAccount, RecordStore, SourceAdapter,
};
pub use aggregator::{Dispatch, SearchAggregator, DEBOUNCE};
pub use filter::{RelevanceFilter, SCORE_ALL_TOKENS, SCORE_EXACT, SCORE_FUZZY, SCORE_PREFIX, SCORE_SUBSTRING};
pub use item::{Category, NavigateTo, ResultSet, SearchItem, MAX_RESULTS_PER_CATEGORY};
pub use palette::{parse_prefix, Palette};
pub use recent::{JsonRecentStore, MemoryRecentStore, RecentEntry, RecentList, RecentStore, MAX_RECENT};
pub use selection::Selection;
