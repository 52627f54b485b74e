//! # Validation Tier Tests (T0-T4)
//!
//! If ANY tier fails, the tracker is INVALID.
//!
//! ## Tiers
//! - T0: Load Normalization
//! - T1: Categorization Rules
//! - T2: Persistence Round Trip
//! - T3: Surface Flows
//! - T4: Concurrent Writers

use novel_hider_core::{
    Action, ActionContext, CategorizationEngine, Category, ManualClock, MemoryArea, NovelRecord,
    Outcome, RecordStore, Repository, Timestamp, records_from_bytes,
};

// =============================================================================
// TIER T0: LOAD NORMALIZATION
// =============================================================================

mod t0_load_normalization {
    use super::*;

    /// T0.1: A legacy entry without category or timestamp loads as disliked at 0.
    #[test]
    fn legacy_entry_defaults() {
        let records = records_from_bytes(br#"[{"url":"u","title":"T"}]"#).expect("load");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, Category::Disliked);
        assert_eq!(records[0].last_updated, Timestamp(0));
    }

    /// T0.2: Chapter fields stored on a non-tracking category are dropped.
    #[test]
    fn stray_chapter_fields_dropped() {
        let bytes = br#"[{"url":"u","title":"T","category":"completed","currentChapterUrl":"c"}]"#;
        let records = records_from_bytes(bytes).expect("load");

        assert_eq!(records[0].current_chapter_url(), None);
    }

    /// T0.3: Malformed entries are skipped; the rest survive.
    #[test]
    fn malformed_entries_skipped() {
        let bytes = br#"[{"title":"no url"},{"url":"u","title":"T","category":"bogus"},{"url":"ok","title":"Ok","category":"hiatus"}]"#;
        let records = records_from_bytes(bytes).expect("load");

        let urls: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["ok"]);
    }

    /// T0.4: An absent slot loads as an empty store.
    #[test]
    fn absent_slot_is_empty() {
        let repo = Repository::new(MemoryArea::new());
        assert!(repo.load().is_empty());
    }
}

// =============================================================================
// TIER T1: CATEGORIZATION RULES
// =============================================================================

mod t1_categorization {
    use super::*;

    fn written(outcome: Outcome) -> NovelRecord {
        match outcome {
            Outcome::Write(record) => record,
            other => unreachable!("expected a write, got {other:?}"),
        }
    }

    /// T1.1: The full reading, chapter, disliked, unmark walk.
    #[test]
    fn scenario_walk() {
        let t0 = Timestamp(1_000);
        let t1 = Timestamp(2_000);

        let first = written(CategorizationEngine::apply(
            None,
            "u1",
            "T1",
            Category::Reading.into(),
            &ActionContext::none(),
            t0,
        ));
        assert_eq!(first, NovelRecord::new("u1", "T1", Category::Reading, t0));
        assert_eq!(first.current_chapter_url(), None);

        let second = written(CategorizationEngine::apply(
            Some(&first),
            "u1",
            "T1",
            Category::Reading.into(),
            &ActionContext::chapter("c1", "Ch1"),
            t1,
        ));
        assert_eq!(second.current_chapter_url(), Some("c1"));
        assert_eq!(second.current_chapter_title(), Some("Ch1"));
        assert!(second.last_updated > first.last_updated);

        let third = written(CategorizationEngine::apply(
            Some(&second),
            "u1",
            "T1",
            Category::Disliked.into(),
            &ActionContext::none(),
            t1,
        ));
        assert_eq!(third.current_chapter_url(), None);

        let mut store = RecordStore::from_records([third]);
        let changed = CategorizationEngine::apply_to_store(
            &mut store,
            "u1",
            "T1",
            Action::Unmark,
            &ActionContext::none(),
            t1,
        );
        assert!(changed);
        assert!(!store.contains("u1"));
    }

    /// T1.2: Moving reading to hiatus without context keeps the chapter.
    #[test]
    fn hiatus_retains_chapter() {
        let reading = NovelRecord::new("u", "T", Category::Reading, Timestamp(1))
            .with_chapter(novel_hider_core::ChapterMark::new("c9", "Ch9"));

        let hiatus = written(CategorizationEngine::apply(
            Some(&reading),
            "u",
            "T",
            Category::Hiatus.into(),
            &ActionContext::none(),
            Timestamp(2),
        ));

        assert_eq!(hiatus.current_chapter_url(), Some("c9"));
        assert_eq!(hiatus.current_chapter_title(), Some("Ch9"));
    }

    /// T1.3: Categorizing without a title is a no-op.
    #[test]
    fn missing_title_unchanged() {
        let outcome = CategorizationEngine::apply(
            None,
            "u",
            "",
            Category::Reading.into(),
            &ActionContext::none(),
            Timestamp(1),
        );
        assert_eq!(outcome, Outcome::Unchanged);
    }
}

// =============================================================================
// TIER T2: PERSISTENCE ROUND TRIP
// =============================================================================

mod t2_persistence {
    use super::*;
    use novel_hider_core::{FileArea, RedbArea};

    fn sample() -> RecordStore {
        RecordStore::from_records([
            NovelRecord::new("a", "A", Category::Reading, Timestamp(3))
                .with_chapter(novel_hider_core::ChapterMark::new("a/1", "One")),
            NovelRecord::new("b", "B", Category::Completed, Timestamp(1)),
        ])
    }

    /// T2.1: The file area reloads exactly what was saved.
    #[test]
    fn file_area_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Repository::new(FileArea::open(dir.path().join("store.json")));

        repo.save(&sample()).expect("save");

        let reopened = Repository::new(FileArea::open(dir.path().join("store.json")));
        assert_eq!(reopened.load(), sample());
    }

    /// T2.2: The redb area reloads exactly what was saved.
    #[test]
    fn redb_area_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.redb");
        {
            let repo = Repository::new(RedbArea::open(&path).expect("open"));
            repo.save(&sample()).expect("save");
        }

        let repo = Repository::new(RedbArea::open(&path).expect("reopen"));
        assert_eq!(repo.load(), sample());
    }

    /// T2.3: Separate slots in one area do not see each other.
    #[test]
    fn slots_are_isolated() {
        let area = MemoryArea::new();
        let main = Repository::new(area.clone());
        let other = Repository::with_slot(area, "otherSlot");

        main.save(&sample()).expect("save");

        assert!(other.load().is_empty());
        assert_eq!(main.load().len(), 2);
    }
}

// =============================================================================
// TIER T3: SURFACE FLOWS
// =============================================================================

mod t3_surfaces {
    use super::*;
    use novel_hider_core::{
        ChapterPage, ChapterSurface, Filter, ListItem, ListSurface, NovelPage, NovelSurface,
        OptionsSurface, Status,
    };

    const NOVEL: &str = "https://twkan.com/book/42.html";

    /// T3.1: A novel tracked from a chapter page is hidden on the list page
    /// and shows up under Reading on the options page.
    #[test]
    fn chapter_tracking_propagates() {
        let repo = Repository::new(MemoryArea::new());
        let clock = ManualClock::starting_at(50);
        let page = ChapterPage {
            page_url: "https://twkan.com/txt/42/7".to_string(),
            novel_link_href: Some("https://twkan.com/book/42/index.html".to_string()),
            novel_link_text: Some("Forty Two".to_string()),
            chapter_title: Some("Chapter 7".to_string()),
            has_tools_container: true,
        };

        ChapterSurface::handle(&repo, &clock, &page, Category::Reading.into()).expect("track");

        let list = ListSurface::plan(&repo.load(), &[ListItem::new(NOVEL, "Forty Two")]);
        assert!(list.items[0].hidden);

        let mut options = OptionsSurface::new();
        options.set_filter(Filter::Only(Category::Reading));
        let view = options.view(&repo.load());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(
            view.rows[0].continue_link.as_ref().map(|l| l.text.as_str()),
            Some("Chapter 7")
        );
    }

    /// T3.2: Unmarking from the novel page unhides it on the list page.
    #[test]
    fn unmark_unhides() {
        let repo = Repository::new(MemoryArea::new());
        let clock = ManualClock::starting_at(1);
        let page = NovelPage {
            page_url: NOVEL.to_string(),
            title: Some("Forty Two".to_string()),
            has_container: true,
        };

        NovelSurface::handle(&repo, &clock, &page, Category::Disliked.into()).expect("dislike");
        clock.advance(10);
        let plan = NovelSurface::handle(&repo, &clock, &page, Action::Unmark)
            .expect("unmark")
            .expect("plan");

        assert_eq!(plan.status, Status::Uncategorized);
        let list = ListSurface::plan(&repo.load(), &[ListItem::new(NOVEL, "Forty Two")]);
        assert!(!list.items[0].hidden);
    }
}

// =============================================================================
// TIER T4: CONCURRENT WRITERS
// =============================================================================

mod t4_concurrency {
    use super::*;

    /// T4.1: Two surfaces sharing one area with interleaved read-modify-write
    /// cycles: the later save wins and the earlier update is lost.
    #[test]
    fn last_write_wins() {
        let area = MemoryArea::new();
        let tab_a = Repository::new(area.clone());
        let tab_b = Repository::new(area);
        let clock = ManualClock::starting_at(1);

        let mut stale = tab_a.load();

        tab_b
            .categorize("u2", "Two", Category::Reading.into(), &ActionContext::none(), &clock)
            .expect("tab b");
        assert!(tab_a.load().contains("u2"));

        CategorizationEngine::apply_to_store(
            &mut stale,
            "u1",
            "One",
            Category::Disliked.into(),
            &ActionContext::none(),
            Timestamp(2),
        );
        tab_a.save(&stale).expect("tab a");

        let last = tab_b.load();
        assert!(last.contains("u1"));
        assert!(!last.contains("u2"));
    }

    /// T4.2: Sequential cycles through separate handles see each other.
    #[test]
    fn sequential_cycles_compose() {
        let area = MemoryArea::new();
        let tab_a = Repository::new(area.clone());
        let tab_b = Repository::new(area);
        let clock = ManualClock::starting_at(1);

        tab_a
            .categorize("u1", "One", Category::Hiatus.into(), &ActionContext::none(), &clock)
            .expect("a");
        tab_b
            .categorize("u2", "Two", Category::Completed.into(), &ActionContext::none(), &clock)
            .expect("b");

        assert_eq!(tab_a.load().len(), 2);
    }
}
