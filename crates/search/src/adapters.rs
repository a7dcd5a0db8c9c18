//! Source adapters: one per entity category.
//!
//! An adapter turns a query into a bounded list of normalized result items.
//! Adapters are pure from the caller's perspective - they never mutate
//! shared state and are safe to invoke concurrently. Collaborator data
//! arrives through two ports: [`RecordStore`] for locally cached
//! collections and [`AccountLookup`] for the remote account search, so the
//! engine has no hidden global coupling and can be tested with fakes.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::actions::ActionId;
use crate::filter::{resolve_path, score_value, RelevanceFilter, SCORE_ALL_TOKENS};
use crate::item::{Category, NavigateTo, SearchItem, MAX_RESULTS_PER_CATEGORY};

/// A source of search results for one category.
pub trait SourceAdapter: Send + Sync {
    /// Adapter name for debugging
    fn name(&self) -> &'static str;

    /// The bucket this adapter fills
    fn category(&self) -> Category;

    /// Search for items matching the query.
    /// Implementations must:
    /// - Bound results to `MAX_RESULTS_PER_CATEGORY`
    /// - Return items sorted by score (descending)
    /// - Absorb their own failures into an empty list
    fn search(&self, query: &str) -> Vec<SearchItem>;
}

/// Read-only snapshot port for a locally cached entity collection.
/// Stores that can lend their records directly return a borrowed slice;
/// only stores that must materialize (e.g. behind a lock) pay for a copy.
pub trait RecordStore: Send + Sync {
    fn snapshot(&self) -> Cow<'_, [Value]>;
}

/// A fixed collection; the simplest store (tests, preloaded caches).
impl RecordStore for Vec<Value> {
    fn snapshot(&self) -> Cow<'_, [Value]> {
        Cow::Borrowed(self.as_slice())
    }
}

// ============================================================================
// Remote: accounts
// ============================================================================

/// A raw account row from the remote lookup.
#[derive(Clone, Debug, Deserialize)]
pub struct RawAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
}

/// Remote account search port. Implemented by the API client; tests use
/// scripted fakes.
pub trait AccountLookup: Send + Sync {
    fn lookup(&self, query: &str) -> Result<Vec<RawAccount>, String>;
}

/// Accounts are searched remotely only - there is no local cache.
pub struct AccountAdapter {
    lookup: Arc<dyn AccountLookup>,
}

impl AccountAdapter {
    pub fn new(lookup: Arc<dyn AccountLookup>) -> Self {
        Self { lookup }
    }
}

impl SourceAdapter for AccountAdapter {
    fn name(&self) -> &'static str {
        "accounts"
    }

    fn category(&self) -> Category {
        Category::Account
    }

    fn search(&self, query: &str) -> Vec<SearchItem> {
        // Any failure degrades to an empty bucket; search never surfaces
        // an error state to the user.
        let accounts = match self.lookup.lookup(query) {
            Ok(accounts) => accounts,
            Err(_) => return Vec::new(),
        };

        accounts
            .into_iter()
            .take(MAX_RESULTS_PER_CATEGORY)
            .map(|raw| {
                let subtitle = raw
                    .number
                    .clone()
                    .or_else(|| raw.group.clone())
                    .unwrap_or_default();
                SearchItem::new(
                    Category::Account,
                    format!("account:{}", raw.id),
                    &raw.name,
                    NavigateTo::entity("accounts", raw.id.clone()),
                )
                .with_subtitle(subtitle)
                .with_meta(serde_json::json!({
                    "group": raw.group,
                    "balance": raw.balance,
                }))
            })
            .collect()
    }
}

// ============================================================================
// Local: products, quotations, companies
// ============================================================================

fn record_id(record: &Value) -> Option<String> {
    record["id"]
        .as_i64()
        .map(|n| n.to_string())
        .or_else(|| record["id"].as_str().map(String::from))
}

/// Products, searched by name, SKU, and alias. The subsequence tier is on
/// here: partial SKU fragments like "bw10" should still find "BW-100".
pub struct ProductAdapter {
    records: Arc<dyn RecordStore>,
    filter: RelevanceFilter,
}

impl ProductAdapter {
    const FIELDS: &'static [&'static str] = &["name", "sku", "alias"];

    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            filter: RelevanceFilter::new().with_fuzzy(true),
        }
    }
}

impl SourceAdapter for ProductAdapter {
    fn name(&self) -> &'static str {
        "products"
    }

    fn category(&self) -> Category {
        Category::Product
    }

    fn search(&self, query: &str) -> Vec<SearchItem> {
        let records = self.records.snapshot();
        self.filter
            .rank(&records, Self::FIELDS, query, MAX_RESULTS_PER_CATEGORY)
            .into_iter()
            .filter_map(|(record, score)| {
                let id = record_id(record)?;
                let name = record["name"].as_str()?;
                let mut item = SearchItem::new(
                    Category::Product,
                    format!("product:{id}"),
                    name,
                    NavigateTo::entity("products", id.clone()),
                )
                .with_score(score);
                if let Some(sku) = record["sku"].as_str() {
                    item = item.with_subtitle(sku);
                }
                Some(item)
            })
            .collect()
    }
}

/// Quotations, searched by party name, voucher number, and remark.
pub struct QuotationAdapter {
    records: Arc<dyn RecordStore>,
    filter: RelevanceFilter,
}

impl QuotationAdapter {
    const FIELDS: &'static [&'static str] = &["party_name", "voucher_number", "remark"];

    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            filter: RelevanceFilter::new(),
        }
    }
}

impl SourceAdapter for QuotationAdapter {
    fn name(&self) -> &'static str {
        "quotations"
    }

    fn category(&self) -> Category {
        Category::Quotation
    }

    fn search(&self, query: &str) -> Vec<SearchItem> {
        let records = self.records.snapshot();
        self.filter
            .rank(&records, Self::FIELDS, query, MAX_RESULTS_PER_CATEGORY)
            .into_iter()
            .filter_map(|(record, score)| {
                let id = record_id(record)?;
                let party = record["party_name"].as_str()?;
                // Voucher numbers may be JSON numbers; stringify the same
                // way scoring does so the subtitle matches what matched
                let voucher = resolve_path(record, "voucher_number")
                    .map(|v| v.into_owned())
                    .unwrap_or_default();
                Some(
                    SearchItem::new(
                        Category::Quotation,
                        format!("quotation:{id}"),
                        party,
                        NavigateTo::entity("quotations", id.clone()),
                    )
                    .with_subtitle(voucher)
                    .with_score(score),
                )
            })
            .collect()
    }
}

/// Companies, searched by name only.
pub struct CompanyAdapter {
    records: Arc<dyn RecordStore>,
    filter: RelevanceFilter,
}

impl CompanyAdapter {
    const FIELDS: &'static [&'static str] = &["name"];

    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            filter: RelevanceFilter::new(),
        }
    }
}

impl SourceAdapter for CompanyAdapter {
    fn name(&self) -> &'static str {
        "companies"
    }

    fn category(&self) -> Category {
        Category::Company
    }

    fn search(&self, query: &str) -> Vec<SearchItem> {
        let records = self.records.snapshot();
        self.filter
            .rank(&records, Self::FIELDS, query, MAX_RESULTS_PER_CATEGORY)
            .into_iter()
            .filter_map(|(record, score)| {
                let id = record_id(record)?;
                let name = record["name"].as_str()?;
                Some(
                    SearchItem::new(
                        Category::Company,
                        format!("company:{id}"),
                        name,
                        NavigateTo::entity("companies", id.clone()),
                    )
                    .with_score(score),
                )
            })
            .collect()
    }
}

// ============================================================================
// Static: actions
// ============================================================================

/// The compiled-in command list. Always synchronous; never fetched.
pub struct ActionAdapter;

impl SourceAdapter for ActionAdapter {
    fn name(&self) -> &'static str {
        "actions"
    }

    fn category(&self) -> Category {
        Category::Action
    }

    fn search(&self, query: &str) -> Vec<SearchItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            // The idle list: every action, in display order, uncapped.
            return ActionId::all().iter().map(|a| a.item()).collect();
        }
        let tokens: Vec<&str> = needle.split_whitespace().collect();

        let mut scored: Vec<SearchItem> = ActionId::all()
            .iter()
            .filter_map(|action| {
                let title = action.name().to_lowercase();
                let mut score = score_value(&title, &needle, &tokens, false);
                if score == 0 {
                    let haystack =
                        format!("{} {}", action.description(), action.keywords()).to_lowercase();
                    if tokens.iter().all(|t| haystack.contains(t)) {
                        // Keyword matches rank below any title match
                        score = SCORE_ALL_TOKENS;
                    }
                }
                if score == 0 {
                    None
                } else {
                    Some(action.item().with_score(score))
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(MAX_RESULTS_PER_CATEGORY);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingLookup;

    impl AccountLookup for FailingLookup {
        fn lookup(&self, _query: &str) -> Result<Vec<RawAccount>, String> {
            Err("connection refused".into())
        }
    }

    struct FixedLookup(Vec<RawAccount>);

    impl AccountLookup for FixedLookup {
        fn lookup(&self, _query: &str) -> Result<Vec<RawAccount>, String> {
            Ok(self.0.clone())
        }
    }

    fn account(id: &str, name: &str) -> RawAccount {
        RawAccount {
            id: id.into(),
            name: name.into(),
            number: None,
            group: Some("Sundry Debtors".into()),
            balance: Some(1250.0),
        }
    }

    #[test]
    fn account_adapter_absorbs_lookup_failure() {
        let adapter = AccountAdapter::new(Arc::new(FailingLookup));
        assert!(adapter.search("acme").is_empty());
    }

    #[test]
    fn account_adapter_normalizes_and_bounds() {
        let accounts: Vec<RawAccount> = (0..8)
            .map(|i| account(&i.to_string(), &format!("Account {i}")))
            .collect();
        let adapter = AccountAdapter::new(Arc::new(FixedLookup(accounts)));

        let items = adapter.search("account");
        assert_eq!(items.len(), MAX_RESULTS_PER_CATEGORY);
        assert_eq!(items[0].id, "account:0");
        assert_eq!(items[0].navigate, NavigateTo::entity("accounts", "0"));
        assert_eq!(items[0].subtitle, "Sundry Debtors");
        assert_eq!(items[0].meta["balance"], 1250.0);
    }

    #[test]
    fn product_adapter_searches_name_and_sku() {
        let records: Vec<Value> = vec![
            json!({ "id": 1, "name": "Blue Widget", "sku": "BW-100" }),
            json!({ "id": 2, "name": "Red Widget", "sku": "RW-300" }),
        ];
        let adapter = ProductAdapter::new(Arc::new(records));

        let items = adapter.search("bw-100");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "product:1");
        assert_eq!(items[0].title, "Blue Widget");
        assert_eq!(items[0].subtitle, "BW-100");
    }

    #[test]
    fn product_adapter_fuzzy_matches_sku_fragments() {
        let records: Vec<Value> = vec![json!({ "id": 1, "name": "Blue Widget", "sku": "BW-100" })];
        let adapter = ProductAdapter::new(Arc::new(records));
        assert_eq!(adapter.search("bw10").len(), 1);
    }

    #[test]
    fn quotation_adapter_searches_party_and_voucher() {
        let records: Vec<Value> = vec![
            json!({ "id": 7, "party_name": "Northwind Traders", "voucher_number": "QT-0042" }),
            json!({ "id": 8, "party_name": "Acme Corp", "voucher_number": "QT-0043" }),
        ];
        let adapter = QuotationAdapter::new(Arc::new(records));

        let items = adapter.search("qt-0042");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Northwind Traders");
        assert_eq!(items[0].subtitle, "QT-0042");
        assert_eq!(items[0].navigate, NavigateTo::entity("quotations", "7"));
    }

    #[test]
    fn quotation_adapter_renders_numeric_voucher_subtitles() {
        let records: Vec<Value> =
            vec![json!({ "id": 9, "party_name": "Acme Corp", "voucher_number": 4211 })];
        let adapter = QuotationAdapter::new(Arc::new(records));

        // The numeric voucher both matches and shows
        let items = adapter.search("4211");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtitle, "4211");
    }

    #[test]
    fn vec_store_snapshot_borrows_without_copying() {
        let records: Vec<Value> = vec![json!({ "id": 1, "name": "Acme" })];
        assert!(matches!(records.snapshot(), Cow::Borrowed(_)));
    }

    #[test]
    fn records_missing_required_fields_are_dropped() {
        let records: Vec<Value> = vec![
            json!({ "name": "No Id Ltd" }),
            json!({ "id": 2, "name": "Acme" }),
        ];
        let adapter = CompanyAdapter::new(Arc::new(records));
        let items = adapter.search("");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "company:2");
    }

    #[test]
    fn action_adapter_empty_query_returns_full_list() {
        let items = ActionAdapter.search("");
        assert_eq!(items.len(), ActionId::all().len());
        assert_eq!(items[0].title, "New Quotation");
    }

    #[test]
    fn action_adapter_matches_title_and_keywords() {
        let by_title = ActionAdapter.search("new quotation");
        assert_eq!(by_title[0].id, "action:new-quotation");

        // "estimate" only appears in keywords
        let by_keyword = ActionAdapter.search("estimate");
        assert!(by_keyword.iter().any(|i| i.id == "action:new-quotation"));
    }

    #[test]
    fn action_adapter_title_match_outranks_keyword_match() {
        // "new" is a title prefix for the create actions and a keyword for
        // none of the go-to actions
        let items = ActionAdapter.search("new");
        assert!(items[0].title.starts_with("New"));
        assert!(items[0].score > SCORE_ALL_TOKENS);
    }

    #[test]
    fn action_adapter_keyword_only_match_uses_flat_tier() {
        // "browse" appears only in keyword strings
        let items = ActionAdapter.search("browse");
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.score == SCORE_ALL_TOKENS));
    }
}
