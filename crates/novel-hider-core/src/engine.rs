//! # Categorization Engine
//!
//! Pure merge logic: given the record currently stored for a URL (if any) and
//! a requested action, produce the record to write or a tombstone.
//!
//! Rules, in precedence:
//! 1. `Unmark` always yields `Tombstone`.
//! 2. An empty url or title yields `Unchanged`.
//! 3. The new record is seeded from the existing one and takes the new category.
//! 4. Reading/Hiatus: chapter context overwrites tracking, otherwise the
//!    existing tracking is retained. Disliked/Completed: tracking is cleared.
//! 5. `last_updated` is set to `now` on every write.
//! 6. `title` is always the latest observed value.

use crate::primitives::UNKNOWN_CHAPTER_TITLE;
use crate::{Action, ActionContext, ChapterMark, NovelRecord, RecordStore, Timestamp};

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Store this record under its url.
    Write(NovelRecord),
    /// Delete the record for the url, if any.
    Tombstone,
    /// Invalid input; leave the store untouched.
    Unchanged,
}

impl Outcome {
    /// The record to write, if this outcome writes one.
    #[must_use]
    pub fn record(&self) -> Option<&NovelRecord> {
        match self {
            Self::Write(record) => Some(record),
            Self::Tombstone | Self::Unchanged => None,
        }
    }
}

/// The CategorizationEngine holds no state; every rule is in `apply`.
pub struct CategorizationEngine;

impl CategorizationEngine {
    /// Compute the outcome of `action` on `url`.
    pub fn apply(
        existing: Option<&NovelRecord>,
        url: &str,
        title: &str,
        action: Action,
        context: &ActionContext,
        now: Timestamp,
    ) -> Outcome {
        let category = match action {
            Action::Unmark => return Outcome::Tombstone,
            Action::Categorize(category) => category,
        };

        if url.is_empty() || title.is_empty() {
            tracing::debug!(url, "ignoring categorization with missing url or title");
            return Outcome::Unchanged;
        }

        let retained = existing.and_then(|r| r.chapter.clone());
        let chapter = if category.tracks_chapter() {
            Self::chapter_from_context(context).or(retained)
        } else {
            None
        };

        tracing::debug!(
            url,
            %category,
            tracked = chapter.is_some(),
            "categorized novel"
        );

        Outcome::Write(NovelRecord {
            url: url.to_string(),
            title: title.to_string(),
            category,
            chapter,
            last_updated: now,
        })
    }

    /// Apply `action` to a loaded store in place.
    ///
    /// Returns `true` when the store changed. An unmark on a URL with no
    /// record is not a change.
    pub fn apply_to_store(
        store: &mut RecordStore,
        url: &str,
        title: &str,
        action: Action,
        context: &ActionContext,
        now: Timestamp,
    ) -> bool {
        match Self::apply(store.get(url), url, title, action, context, now) {
            Outcome::Write(record) => {
                store.insert(record);
                true
            }
            Outcome::Tombstone => store.remove(url).is_some(),
            Outcome::Unchanged => false,
        }
    }

    /// Chapter data carried by the context. An empty chapter URL counts as
    /// no chapter at all.
    fn chapter_from_context(context: &ActionContext) -> Option<ChapterMark> {
        let chapter = context.chapter.as_ref()?;
        if chapter.url.is_empty() {
            return None;
        }
        let title = if chapter.title.trim().is_empty() {
            UNKNOWN_CHAPTER_TITLE.to_string()
        } else {
            chapter.title.clone()
        };
        Some(ChapterMark::new(chapter.url.clone(), title))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn tracked(category: Category) -> NovelRecord {
        NovelRecord::new("u1", "Old Title", category, Timestamp(10))
            .with_chapter(ChapterMark::new("c0", "Ch0"))
    }

    #[allow(clippy::panic)]
    fn write(outcome: Outcome) -> NovelRecord {
        match outcome {
            Outcome::Write(record) => record,
            other => panic!("expected a write, got {other:?}"),
        }
    }

    #[test]
    fn unmark_is_tombstone_even_with_empty_input() {
        let outcome = CategorizationEngine::apply(
            None,
            "",
            "",
            Action::Unmark,
            &ActionContext::none(),
            Timestamp(1),
        );
        assert_eq!(outcome, Outcome::Tombstone);
    }

    #[test]
    fn empty_title_is_unchanged() {
        let existing = tracked(Category::Reading);
        let outcome = CategorizationEngine::apply(
            Some(&existing),
            "u1",
            "",
            Action::Categorize(Category::Completed),
            &ActionContext::none(),
            Timestamp(20),
        );
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn new_record_has_no_tracking() {
        let record = write(CategorizationEngine::apply(
            None,
            "u1",
            "T1",
            Category::Reading.into(),
            &ActionContext::none(),
            Timestamp(5),
        ));
        assert_eq!(record, NovelRecord::new("u1", "T1", Category::Reading, Timestamp(5)));
    }

    #[test]
    fn non_chapter_surface_retains_tracking() {
        let existing = tracked(Category::Reading);
        let record = write(CategorizationEngine::apply(
            Some(&existing),
            "u1",
            "New Title",
            Category::Hiatus.into(),
            &ActionContext::none(),
            Timestamp(20),
        ));

        assert_eq!(record.category, Category::Hiatus);
        assert_eq!(record.current_chapter_url(), Some("c0"));
        assert_eq!(record.title, "New Title");
        assert_eq!(record.last_updated, Timestamp(20));
    }

    #[test]
    fn chapter_context_overrides_tracking() {
        let existing = tracked(Category::Hiatus);
        let record = write(CategorizationEngine::apply(
            Some(&existing),
            "u1",
            "Old Title",
            Category::Reading.into(),
            &ActionContext::chapter("c9", "Ch9"),
            Timestamp(30),
        ));

        assert_eq!(record.chapter, Some(ChapterMark::new("c9", "Ch9")));
    }

    #[test]
    fn disliked_and_completed_clear_tracking() {
        for category in [Category::Disliked, Category::Completed] {
            let existing = tracked(Category::Reading);
            let record = write(CategorizationEngine::apply(
                Some(&existing),
                "u1",
                "T",
                category.into(),
                &ActionContext::chapter("c1", "Ch1"),
                Timestamp(40),
            ));
            assert!(record.chapter.is_none(), "{category} kept tracking");
        }
    }

    #[test]
    fn empty_chapter_url_counts_as_no_context() {
        let existing = tracked(Category::Reading);
        let record = write(CategorizationEngine::apply(
            Some(&existing),
            "u1",
            "T",
            Category::Reading.into(),
            &ActionContext::chapter("", "Ignored"),
            Timestamp(50),
        ));
        assert_eq!(record.current_chapter_url(), Some("c0"));
    }

    #[test]
    fn blank_chapter_title_gets_placeholder() {
        let record = write(CategorizationEngine::apply(
            None,
            "u1",
            "T",
            Category::Reading.into(),
            &ActionContext::chapter("c1", "  "),
            Timestamp(50),
        ));
        assert_eq!(record.current_chapter_title(), Some(UNKNOWN_CHAPTER_TITLE));
    }

    #[test]
    fn apply_to_store_reports_changes() {
        let mut store = RecordStore::new();
        let none = ActionContext::none();

        assert!(!CategorizationEngine::apply_to_store(
            &mut store,
            "u1",
            "T",
            Action::Unmark,
            &none,
            Timestamp(1),
        ));
        assert!(CategorizationEngine::apply_to_store(
            &mut store,
            "u1",
            "T",
            Category::Disliked.into(),
            &none,
            Timestamp(2),
        ));
        assert!(!CategorizationEngine::apply_to_store(
            &mut store,
            "",
            "T",
            Category::Disliked.into(),
            &none,
            Timestamp(3),
        ));
        assert!(CategorizationEngine::apply_to_store(
            &mut store,
            "u1",
            "T",
            Action::Unmark,
            &none,
            Timestamp(4),
        ));
        assert!(store.is_empty());
    }
}
