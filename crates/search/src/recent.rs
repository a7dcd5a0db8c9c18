//! Recently selected results.
//!
//! The list survives palette sessions and is mutated only by commit.
//! Persistence goes through the [`RecentStore`] port so the engine never
//! touches the real config directory in tests.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::SearchItem;

/// Cap on the recency list.
pub const MAX_RECENT: usize = 5;

/// One remembered selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentEntry {
    pub item: SearchItem,
    pub last_used: DateTime<Utc>,
}

/// Durable slot for the recency list.
pub trait RecentStore: Send + Sync {
    /// Load persisted entries. Missing or unreadable state is an empty
    /// list, never an error.
    fn load(&self) -> Vec<RecentEntry>;

    fn save(&self, entries: &[RecentEntry]) -> Result<(), String>;
}

/// JSON file store under the user config directory.
pub struct JsonRecentStore {
    path: PathBuf,
}

impl JsonRecentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.config/ledgerdesk/recent.json` (platform equivalent).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ledgerdesk")
            .join("recent.json")
    }
}

impl Default for JsonRecentStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl RecentStore for JsonRecentStore {
    fn load(&self) -> Vec<RecentEntry> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save(&self, entries: &[RecentEntry]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Default)]
pub struct MemoryRecentStore {
    entries: Mutex<Vec<RecentEntry>>,
}

impl RecentStore for MemoryRecentStore {
    fn load(&self) -> Vec<RecentEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn save(&self, entries: &[RecentEntry]) -> Result<(), String> {
        *self.entries.lock().map_err(|e| e.to_string())? = entries.to_vec();
        Ok(())
    }
}

/// The recency list: unique by item id, most recent first, capped.
pub struct RecentList {
    entries: Vec<RecentEntry>,
    store: Box<dyn RecentStore>,
}

impl RecentList {
    /// Read once at startup; the store is written on every push.
    pub fn load(store: Box<dyn RecentStore>) -> Self {
        let mut entries = store.load();
        entries.truncate(MAX_RECENT);
        Self { entries, store }
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &SearchItem> {
        self.entries.iter().map(|e| &e.item)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a selection, de-duplicating by id and enforcing the cap,
    /// then persist. A failed save keeps the in-memory list usable.
    pub fn push(&mut self, item: SearchItem) {
        self.entries.retain(|e| e.item.id != item.id);
        self.entries.insert(
            0,
            RecentEntry {
                item,
                last_used: Utc::now(),
            },
        );
        self.entries.truncate(MAX_RECENT);
        if let Err(e) = self.store.save(&self.entries) {
            eprintln!("Error saving recent searches: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Category, NavigateTo};

    fn item(id: &str) -> SearchItem {
        SearchItem::new(Category::Product, id, id, NavigateTo::module("products"))
    }

    #[test]
    fn push_is_most_recent_first() {
        let mut list = RecentList::load(Box::new(MemoryRecentStore::default()));
        list.push(item("a"));
        list.push(item("b"));
        let ids: Vec<&str> = list.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn push_dedups_by_id() {
        let mut list = RecentList::load(Box::new(MemoryRecentStore::default()));
        list.push(item("a"));
        list.push(item("b"));
        list.push(item("a"));
        let ids: Vec<&str> = list.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn list_is_capped() {
        let mut list = RecentList::load(Box::new(MemoryRecentStore::default()));
        for i in 0..8 {
            list.push(item(&format!("i{i}")));
        }
        assert_eq!(list.entries().len(), MAX_RECENT);
        assert_eq!(list.items().next().unwrap().id, "i7");
    }

    #[test]
    fn json_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.json");

        {
            let store = JsonRecentStore::new(path.clone());
            let mut list = RecentList::load(Box::new(store));
            list.push(item("a"));
            list.push(item("b"));
        }

        let store = JsonRecentStore::new(path);
        let list = RecentList::load(Box::new(store));
        let ids: Vec<&str> = list.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(list.entries()[0].last_used <= Utc::now());
    }

    #[test]
    fn corrupt_or_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();

        let missing = JsonRecentStore::new(dir.path().join("nope.json"));
        assert!(missing.load().is_empty());

        let path = dir.path().join("recent.json");
        std::fs::write(&path, "{ not json").unwrap();
        let corrupt = JsonRecentStore::new(path);
        assert!(corrupt.load().is_empty());
    }

    #[test]
    fn default_path_is_under_ledgerdesk() {
        let path = JsonRecentStore::default_path();
        assert!(path.to_string_lossy().contains("ledgerdesk"));
        assert!(path.to_string_lossy().ends_with("recent.json"));
    }
}
