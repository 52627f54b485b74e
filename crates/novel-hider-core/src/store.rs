//! # Record Store
//!
//! The in-memory mapping from novel URL to record.
//!
//! Keys are unique and iteration follows insertion order: replacing an
//! existing key keeps its slot, removing and re-inserting moves it to the end.
//! Insertion order is the tie-break for sorted listings and the order records
//! are written back to storage.
//!
//! Stored entries that fail to decode are kept verbatim in a side list and
//! written back after the records, so a save never drops data the loader
//! could not read. Writing or removing a record for the same URL discards
//! the raw entry.

use crate::NovelRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered, URL-keyed collection of novel records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    /// Records in insertion order.
    records: Vec<NovelRecord>,
    /// Reverse lookup: url -> position in `records`.
    index: BTreeMap<String, usize>,
    /// Undecodable stored entries, in stored order.
    retained: Vec<Value>,
}

/// The `url` field of a raw stored entry, if it has one.
fn raw_url(entry: &Value) -> Option<&str> {
    entry.get("url").and_then(Value::as_str)
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in order.
    ///
    /// A repeated URL replaces the earlier record's value but keeps its
    /// position.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = NovelRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&NovelRecord> {
        self.index.get(url).and_then(|&i| self.records.get(i))
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Insert or replace the record for `record.url`.
    ///
    /// Returns the previous record, if any.
    pub fn insert(&mut self, record: NovelRecord) -> Option<NovelRecord> {
        self.drop_retained(&record.url);
        let existing = self.index.get(&record.url).copied();
        if let Some(slot) = existing.and_then(|i| self.records.get_mut(i)) {
            return Some(std::mem::replace(slot, record));
        }
        self.index.insert(record.url.clone(), self.records.len());
        self.records.push(record);
        None
    }

    /// Remove the record for `url`, returning it.
    pub fn remove(&mut self, url: &str) -> Option<NovelRecord> {
        self.drop_retained(url);
        let position = self.index.remove(url)?;
        let removed = self.records.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Remove every record, including retained raw entries.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
        self.retained.clear();
    }

    /// Keep an undecodable stored entry so it is written back on save.
    ///
    /// Ignored when a record for the entry's URL is already present.
    pub fn retain_raw(&mut self, entry: Value) {
        if raw_url(&entry).is_some_and(|url| self.contains(url)) {
            return;
        }
        self.retained.push(entry);
    }

    /// Raw entries carried through from storage.
    #[must_use]
    pub fn retained(&self) -> &[Value] {
        &self.retained
    }

    fn drop_retained(&mut self, url: &str) {
        if !self.retained.is_empty() {
            self.retained.retain(|entry| raw_url(entry) != Some(url));
        }
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NovelRecord> {
        self.records.iter()
    }

    /// Iterate URLs in insertion order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.url.as_str())
    }

    /// Consume the store, yielding records in insertion order.
    #[must_use]
    pub fn into_records(self) -> Vec<NovelRecord> {
        self.records
    }
}

impl FromIterator<NovelRecord> for RecordStore {
    fn from_iter<T: IntoIterator<Item = NovelRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a NovelRecord;
    type IntoIter = std::slice::Iter<'a, NovelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
