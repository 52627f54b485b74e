//! Chapter reader page.
//!
//! Offers Reading and Hiatus tracking for the novel the chapter belongs to.
//! A tracking control is disabled only when the novel already holds that
//! category *and* the tracked chapter is this one. "Untrack Novel" appears
//! only for categorized novels.

use super::{Control, category_control_disabled, serialize_status};
use crate::links::{normalize_page_url, novel_url_from_index};
use crate::primitives::UNKNOWN_CHAPTER_TITLE;
use crate::projections::{Status, current_status};
use crate::storage::StorageArea;
use crate::{Action, ActionContext, Category, Clock, NovelHiderError, RecordStore, Repository};
use serde::Serialize;

/// Label of the unmark control on chapter pages.
pub const UNTRACK_LABEL: &str = "Untrack Novel";

/// Data scraped from a chapter page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterPage {
    /// The chapter's address as reported by the browser.
    pub page_url: String,
    /// `href` of the breadcrumb link to the novel's table of contents.
    pub novel_link_href: Option<String>,
    /// Text of that breadcrumb link.
    pub novel_link_text: Option<String>,
    /// Text of the chapter heading, `None` if missing.
    pub chapter_title: Option<String>,
    /// Whether the tools container anchor exists.
    pub has_tools_container: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterPlan {
    pub novel_url: String,
    pub novel_title: String,
    pub chapter_url: String,
    pub chapter_title: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: Status,
    pub controls: Vec<Control>,
}

/// Controller for chapter pages.
pub struct ChapterSurface;

impl ChapterSurface {
    /// Plan the tracking controls, or `None` if the page lacks its anchors.
    pub fn plan(store: &RecordStore, page: &ChapterPage) -> Option<ChapterPlan> {
        if !page.has_tools_container {
            return None;
        }
        let href = page.novel_link_href.as_deref()?;
        let novel_title = page.novel_link_text.as_deref()?.trim().to_string();
        let novel_url = novel_url_from_index(href);
        let chapter_url = normalize_page_url(&page.page_url).to_string();
        let chapter_title = page
            .chapter_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_CHAPTER_TITLE)
            .to_string();

        let record = store.get(&novel_url);
        let status = current_status(store, &novel_url);

        let mut controls: Vec<Control> = [Category::Reading, Category::Hiatus]
            .iter()
            .map(|&c| {
                let disabled = category_control_disabled(record, c, Some(chapter_url.as_str()));
                Control::category(c, disabled)
            })
            .collect();
        if status.is_categorized() {
            controls.push(Control::unmark(UNTRACK_LABEL, false));
        }

        Some(ChapterPlan {
            novel_url,
            novel_title,
            chapter_url,
            chapter_title,
            status,
            controls,
        })
    }

    /// Apply a control and return the refreshed plan.
    ///
    /// Category actions carry this chapter as tracking context; unmark does
    /// not.
    pub fn handle<A: StorageArea>(
        repo: &Repository<A>,
        clock: &impl Clock,
        page: &ChapterPage,
        action: Action,
    ) -> Result<Option<ChapterPlan>, NovelHiderError> {
        let store = repo.try_load()?;
        let Some(plan) = Self::plan(&store, page) else {
            return Ok(None);
        };
        let context = match action {
            Action::Categorize(_) => ActionContext::chapter(&plan.chapter_url, &plan.chapter_title),
            Action::Unmark => ActionContext::none(),
        };
        let store = repo.commit(
            store,
            &plan.novel_url,
            &plan.novel_title,
            action,
            &context,
            clock,
        )?;
        if let Action::Categorize(category) = action {
            tracing::info!(category = %category, chapter = %plan.chapter_title, "tracking chapter");
        }
        Ok(Self::plan(&store, page))
    }
}
