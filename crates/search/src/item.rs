//! Result types shared by every search source.
//!
//! All searchable things reduce to one shape: a `SearchItem` with a stable
//! id, a category, display strings, and a navigation target. Items live only
//! for the duration of one query's results (except when persisted as recent
//! selections).

use serde::{Deserialize, Serialize};

/// Cap on results per category bucket.
pub const MAX_RESULTS_PER_CATEGORY: usize = 5;

// ============================================================================
// Categories
// ============================================================================

/// The kind of search result. `All` is the virtual aggregate view; it is
/// never used as a bucket key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Account,
    Product,
    Quotation,
    Company,
    Action,
    All,
}

impl Category {
    /// Display name for the category tab
    pub fn name(&self) -> &'static str {
        match self {
            Self::Account => "Accounts",
            Self::Product => "Products",
            Self::Quotation => "Quotations",
            Self::Company => "Companies",
            Self::Action => "Actions",
            Self::All => "All",
        }
    }

    /// Icon or prefix character for visual typing
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Account => "@",
            Self::Product => "#",
            Self::Quotation => "%",
            Self::Company => "$",
            Self::Action => ">",
            Self::All => "*",
        }
    }

    /// Tab/Shift+Tab cycle order for the category switcher.
    pub const CYCLE: [Category; 6] = [
        Self::All,
        Self::Account,
        Self::Product,
        Self::Quotation,
        Self::Company,
        Self::Action,
    ];

    /// Merge priority when flattening buckets into the `All` view.
    /// Actions surface first regardless of score - commands are primary.
    pub const FLATTEN: [Category; 5] = [
        Self::Action,
        Self::Quotation,
        Self::Account,
        Self::Product,
        Self::Company,
    ];

    /// Map a query sigil to a category scope (`>q` searches actions only).
    pub fn from_prefix(c: char) -> Option<Category> {
        match c {
            '@' => Some(Self::Account),
            '#' => Some(Self::Product),
            '%' => Some(Self::Quotation),
            '$' => Some(Self::Company),
            '>' => Some(Self::Action),
            _ => None,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// Navigation target handed back to the host on commit.
/// Uses module/id/action strings instead of closures so committed results
/// stay serializable, testable, and loggable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigateTo {
    /// Host screen, e.g. "quotations"
    pub module: String,
    /// Entity to open within the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Verb within the module, e.g. "new"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl NavigateTo {
    /// Navigate to a module's list screen
    pub fn module(module: impl Into<String>) -> Self {
        Self { module: module.into(), id: None, action: None }
    }

    /// Navigate to one entity within a module
    pub fn entity(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self { module: module.into(), id: Some(id.into()), action: None }
    }

    /// Invoke a module action (e.g. "new")
    pub fn action(module: impl Into<String>, action: impl Into<String>) -> Self {
        Self { module: module.into(), id: None, action: Some(action.into()) }
    }
}

/// A single search result item
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchItem {
    /// Stable id, unique across categories (e.g. "product:42")
    pub id: String,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Extra display payload for the host (balance, group, ...)
    #[serde(default)]
    pub meta: serde_json::Value,
    pub navigate: NavigateTo,
    /// Accumulated relevance score; 0 for items not produced by scoring
    #[serde(default)]
    pub score: u32,
}

impl SearchItem {
    pub fn new(
        category: Category,
        id: impl Into<String>,
        title: impl Into<String>,
        navigate: NavigateTo,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            subtitle: String::new(),
            meta: serde_json::Value::Null,
            navigate,
            score: 0,
        }
    }

    /// Builder: set subtitle
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Builder: set meta payload
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = meta;
        self
    }

    /// Builder: set score
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }
}

// ============================================================================
// Result set
// ============================================================================

/// Per-category result buckets for one settled search.
/// Buckets are committed as a whole - a partially filled set is never
/// visible to the host.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    pub account: Vec<SearchItem>,
    pub product: Vec<SearchItem>,
    pub quotation: Vec<SearchItem>,
    pub company: Vec<SearchItem>,
    pub action: Vec<SearchItem>,
}

impl ResultSet {
    /// Bucket for a concrete category. `All` has no bucket and yields an
    /// empty slice.
    pub fn bucket(&self, category: Category) -> &[SearchItem] {
        match category {
            Category::Account => &self.account,
            Category::Product => &self.product,
            Category::Quotation => &self.quotation,
            Category::Company => &self.company,
            Category::Action => &self.action,
            Category::All => &[],
        }
    }

    /// Append items into a bucket, enforcing the per-category cap.
    /// Items destined for `All` are dropped - it is not a bucket.
    pub fn extend(&mut self, category: Category, items: Vec<SearchItem>) {
        let bucket = match category {
            Category::Account => &mut self.account,
            Category::Product => &mut self.product,
            Category::Quotation => &mut self.quotation,
            Category::Company => &mut self.company,
            Category::Action => &mut self.action,
            Category::All => return,
        };
        bucket.extend(items);
        bucket.truncate(MAX_RESULTS_PER_CATEGORY);
    }

    /// Flatten buckets into one sequence under the fixed merge priority.
    pub fn flatten(&self) -> Vec<&SearchItem> {
        Category::FLATTEN
            .iter()
            .flat_map(|&c| self.bucket(c).iter())
            .collect()
    }

    /// The sequence the selection operates over for a given active category.
    pub fn flat(&self, active: Category) -> Vec<&SearchItem> {
        match active {
            Category::All => self.flatten(),
            c => self.bucket(c).iter().collect(),
        }
    }

    pub fn flat_len(&self, active: Category) -> usize {
        match active {
            Category::All => self.total_len(),
            c => self.bucket(c).len(),
        }
    }

    pub fn total_len(&self) -> usize {
        Category::FLATTEN.iter().map(|&c| self.bucket(c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Category, id: &str) -> SearchItem {
        SearchItem::new(category, id, id, NavigateTo::module("x"))
    }

    #[test]
    fn flatten_follows_fixed_priority() {
        let mut rs = ResultSet::default();
        rs.extend(Category::Product, vec![item(Category::Product, "p1")]);
        rs.extend(Category::Action, vec![item(Category::Action, "a1")]);
        rs.extend(Category::Account, vec![item(Category::Account, "acc1")]);
        rs.extend(Category::Quotation, vec![item(Category::Quotation, "q1")]);
        rs.extend(Category::Company, vec![item(Category::Company, "c1")]);

        let ids: Vec<&str> = rs.flatten().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a1", "q1", "acc1", "p1", "c1"]);
    }

    #[test]
    fn extend_enforces_bucket_cap() {
        let mut rs = ResultSet::default();
        let items: Vec<SearchItem> = (0..8)
            .map(|i| item(Category::Product, &format!("p{i}")))
            .collect();
        rs.extend(Category::Product, items);
        assert_eq!(rs.product.len(), MAX_RESULTS_PER_CATEGORY);
        assert_eq!(rs.product[0].id, "p0");
    }

    #[test]
    fn all_is_not_a_bucket() {
        let mut rs = ResultSet::default();
        rs.extend(Category::All, vec![item(Category::Action, "a")]);
        assert!(rs.is_empty());
        assert!(rs.bucket(Category::All).is_empty());
    }

    #[test]
    fn flat_for_single_category() {
        let mut rs = ResultSet::default();
        rs.extend(Category::Company, vec![item(Category::Company, "c1")]);
        rs.extend(Category::Action, vec![item(Category::Action, "a1")]);
        assert_eq!(rs.flat(Category::Company).len(), 1);
        assert_eq!(rs.flat_len(Category::All), 2);
    }

    #[test]
    fn prefix_mapping_round_trips() {
        for c in ['@', '#', '%', '$', '>'] {
            let cat = Category::from_prefix(c).unwrap();
            assert_eq!(cat.icon(), c.to_string());
        }
        assert_eq!(Category::from_prefix('!'), None);
    }

    #[test]
    fn navigate_serialization_skips_empty_fields() {
        let nav = NavigateTo::module("accounts");
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json, serde_json::json!({ "module": "accounts" }));

        let nav = NavigateTo::action("quotations", "new");
        let json = serde_json::to_value(&nav).unwrap();
        assert_eq!(json["action"], "new");
        assert!(json.get("id").is_none());
    }
}
