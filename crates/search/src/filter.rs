//! Relevance scoring and filtering over raw entity records.
//!
//! Records are `serde_json::Value` snapshots of REST resources; fields are
//! dotted paths into them. The filter is pure and synchronous - no IO, no
//! shared state - and is the single source of truth for scoring: callers
//! that want the fuzzy tier flip a flag instead of calling a different
//! function.

use std::borrow::Cow;

use serde_json::Value;

/// Score tiers, evaluated in priority order per field. First match wins for
/// that field; scores accumulate additively across fields.
pub const SCORE_EXACT: u32 = 100;
pub const SCORE_PREFIX: u32 = 75;
pub const SCORE_SUBSTRING: u32 = 50;
pub const SCORE_ALL_TOKENS: u32 = 25;
pub const SCORE_FUZZY: u32 = 10;

/// Tiered relevance filter.
#[derive(Clone, Copy, Debug, Default)]
pub struct RelevanceFilter {
    /// Enable the subsequence tier. Off by default; callers that need high
    /// precision leave it off.
    pub fuzzy: bool,
}

impl RelevanceFilter {
    pub fn new() -> Self {
        Self { fuzzy: false }
    }

    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Filter `items` down to at most `max_results`, ranked by descending
    /// accumulated score across `fields` (stable on ties).
    ///
    /// An empty (or all-whitespace) query is the browse state, not a miss:
    /// the first `max_results` items come back unchanged in order.
    pub fn filter<'a>(
        &self,
        items: &'a [Value],
        fields: &[&str],
        query: &str,
        max_results: usize,
    ) -> Vec<&'a Value> {
        self.rank(items, fields, query, max_results)
            .into_iter()
            .map(|(item, _)| item)
            .collect()
    }

    /// Like [`filter`](Self::filter), but keeps the accumulated score with
    /// each item so adapters can carry it onto result items.
    pub fn rank<'a>(
        &self,
        items: &'a [Value],
        fields: &[&str],
        query: &str,
        max_results: usize,
    ) -> Vec<(&'a Value, u32)> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return items.iter().take(max_results).map(|i| (i, 0)).collect();
        }

        let needle = trimmed.to_lowercase();
        let tokens: Vec<&str> = needle.split_whitespace().collect();

        let mut scored: Vec<(&Value, u32)> = items
            .iter()
            .filter_map(|item| {
                let score = self.score_record(item, fields, &needle, &tokens);
                if score == 0 {
                    None
                } else {
                    Some((item, score))
                }
            })
            .collect();

        // Stable sort: ties keep original collection order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(max_results);
        scored
    }

    /// Accumulated score of one record across all fields.
    /// `needle` must already be lowercased and trimmed.
    pub fn score_record(
        &self,
        record: &Value,
        fields: &[&str],
        needle: &str,
        tokens: &[&str],
    ) -> u32 {
        fields
            .iter()
            .filter_map(|field| resolve_path(record, field))
            .map(|value| score_value(&value.to_lowercase(), needle, tokens, self.fuzzy))
            .sum()
    }
}

/// Score one field value against the query tiers. All inputs lowercased.
pub fn score_value(value: &str, needle: &str, tokens: &[&str], fuzzy: bool) -> u32 {
    if value == needle {
        SCORE_EXACT
    } else if value.starts_with(needle) {
        SCORE_PREFIX
    } else if value.contains(needle) {
        SCORE_SUBSTRING
    } else if !tokens.is_empty() && tokens.iter().all(|t| value.contains(t)) {
        SCORE_ALL_TOKENS
    } else if fuzzy && is_subsequence(needle, value) {
        SCORE_FUZZY
    } else {
        0
    }
}

/// Resolve a dotted field path inside a record. Absent segments, non-object
/// intermediates, and non-scalar leaves all resolve to None - never an error.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<Cow<'a, str>> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    match current {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// True when `needle`'s characters appear in `haystack` in order,
/// not necessarily contiguously. Whitespace in the needle is ignored.
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle
        .chars()
        .filter(|c| !c.is_whitespace())
        .all(|n| chars.any(|h| h == n))
}
