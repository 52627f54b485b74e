//! # View Projections
//!
//! Read-only derivations over a loaded [`RecordStore`] that tell a surface
//! what to render. Nothing here mutates or creates records.

use crate::primitives::HIDDEN_CATEGORIES;
use crate::{Category, NovelHiderError, NovelRecord, RecordStore};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// STATUS
// =============================================================================

/// The current status of one novel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Uncategorized,
    Categorized(Category),
}

impl Status {
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Uncategorized => None,
            Self::Categorized(c) => Some(c),
        }
    }

    #[must_use]
    pub fn is_categorized(self) -> bool {
        matches!(self, Self::Categorized(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncategorized => f.write_str("uncategorized"),
            Self::Categorized(c) => c.fmt(f),
        }
    }
}

// =============================================================================
// LISTING PARAMETERS
// =============================================================================

/// Which records a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    #[must_use]
    pub fn matches(self, record: &NovelRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => record.category == c,
        }
    }
}

impl FromStr for Filter {
    type Err = NovelHiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Category>()
            .map(Self::Only)
            .map_err(|_| NovelHiderError::UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(c) => c.fmt(f),
        }
    }
}

/// Direction of the `last_updated` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Oldest first, newest at the bottom.
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = NovelHiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(Self::Ascending),
            "desc" | "descending" | "newest" => Ok(Self::Descending),
            _ => Err(NovelHiderError::UnknownOrder(s.to_string())),
        }
    }
}

// =============================================================================
// COUNTS
// =============================================================================

/// Summary counts for the options page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryCounts {
    pub total: usize,
    pub reading: usize,
    pub disliked: usize,
    pub hiatus: usize,
    pub completed: usize,
}

impl CategoryCounts {
    #[must_use]
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Reading => self.reading,
            Category::Disliked => self.disliked,
            Category::Hiatus => self.hiatus,
            Category::Completed => self.completed,
        }
    }
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// URLs hidden from list views: every categorized novel.
#[must_use]
pub fn hidden_set(store: &RecordStore) -> BTreeSet<String> {
    store
        .iter()
        .filter(|r| HIDDEN_CATEGORIES.contains(&r.category))
        .map(|r| r.url.clone())
        .collect()
}

/// Current status of `url`.
#[must_use]
pub fn current_status(store: &RecordStore, url: &str) -> Status {
    store
        .get(url)
        .map_or(Status::Uncategorized, |r| Status::Categorized(r.category))
}

/// Records matching `filter`, ordered by `last_updated`.
///
/// Records with equal timestamps keep insertion order in both directions.
#[must_use]
pub fn filtered_sorted(store: &RecordStore, filter: Filter, order: SortOrder) -> Vec<&NovelRecord> {
    let mut records: Vec<&NovelRecord> = store.iter().filter(|r| filter.matches(r)).collect();
    match order {
        SortOrder::Ascending => records.sort_by_key(|r| r.last_updated),
        SortOrder::Descending => records.sort_by(|a, b| b.last_updated.cmp(&a.last_updated)),
    }
    records
}

/// Total and per-category counts.
#[must_use]
pub fn category_counts(store: &RecordStore) -> CategoryCounts {
    let mut counts = CategoryCounts {
        total: store.len(),
        ..CategoryCounts::default()
    };
    for record in store {
        let slot = match record.category {
            Category::Reading => &mut counts.reading,
            Category::Disliked => &mut counts.disliked,
            Category::Hiatus => &mut counts.hiatus,
            Category::Completed => &mut counts.completed,
        };
        *slot = slot.saturating_add(1);
    }
    counts
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    fn store() -> RecordStore {
        RecordStore::from_records([
            NovelRecord::new("a", "A", Category::Reading, Timestamp(30)),
            NovelRecord::new("b", "B", Category::Disliked, Timestamp(10)),
            NovelRecord::new("c", "C", Category::Reading, Timestamp(10)),
            NovelRecord::new("d", "D", Category::Completed, Timestamp(20)),
        ])
    }

    fn urls(records: &[&NovelRecord]) -> Vec<String> {
        records.iter().map(|r| r.url.clone()).collect()
    }

    #[test]
    fn every_category_is_hidden() {
        let hidden = hidden_set(&store());
        assert_eq!(hidden.len(), 4);
        assert!(hidden.contains("a"));
        assert!(!hidden.contains("z"));
    }

    #[test]
    fn status_of_unknown_url_is_uncategorized() {
        let s = store();
        assert_eq!(current_status(&s, "d"), Status::Categorized(Category::Completed));
        assert_eq!(current_status(&s, "z"), Status::Uncategorized);
        assert_eq!(Status::Uncategorized.to_string(), "uncategorized");
    }

    #[test]
    fn ties_keep_insertion_order_both_ways() {
        let s = store();
        let asc = filtered_sorted(&s, Filter::All, SortOrder::Ascending);
        let desc = filtered_sorted(&s, Filter::All, SortOrder::Descending);

        assert_eq!(urls(&asc), vec!["b", "c", "d", "a"]);
        assert_eq!(urls(&desc), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn filter_selects_one_category() {
        let s = store();
        let reading = filtered_sorted(&s, Filter::Only(Category::Reading), SortOrder::Descending);
        assert_eq!(urls(&reading), vec!["a", "c"]);
    }

    #[test]
    fn counts_cover_each_category() {
        let counts = category_counts(&store());
        assert_eq!(counts.total, 4);
        assert_eq!(counts.get(Category::Reading), 2);
        assert_eq!(counts.hiatus, 0);
    }

    #[test]
    fn parse_filter_and_order() {
        assert_eq!("all".parse::<Filter>().expect("parse"), Filter::All);
        assert_eq!(
            "hiatus".parse::<Filter>().expect("parse"),
            Filter::Only(Category::Hiatus)
        );
        assert!(matches!("x".parse::<Filter>(), Err(NovelHiderError::UnknownFilter(_))));
        assert_eq!("desc".parse::<SortOrder>().expect("parse"), SortOrder::Descending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }
}
