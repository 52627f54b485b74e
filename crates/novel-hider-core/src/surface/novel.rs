//! Novel detail page: all four category controls plus Unmark.

use super::{Control, category_control_disabled, serialize_status};
use crate::links::normalize_page_url;
use crate::projections::{Status, current_status};
use crate::storage::StorageArea;
use crate::{Action, ActionContext, Category, Clock, NovelHiderError, RecordStore, Repository};
use serde::Serialize;

/// Data scraped from a novel page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelPage {
    /// The page address as reported by the browser.
    pub page_url: String,
    /// Text of the title anchor, `None` if the anchor is missing.
    pub title: Option<String>,
    /// Whether the button-bar anchor exists.
    pub has_container: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NovelPlan {
    pub url: String,
    pub title: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: Status,
    pub controls: Vec<Control>,
}

/// Controller for novel pages.
pub struct NovelSurface;

impl NovelSurface {
    /// Plan the button bar, or `None` if the page lacks its anchors.
    pub fn plan(store: &RecordStore, page: &NovelPage) -> Option<NovelPlan> {
        if !page.has_container {
            return None;
        }
        let title = page.title.as_deref()?.trim().to_string();
        let url = normalize_page_url(&page.page_url).to_string();

        let record = store.get(&url);
        let status = current_status(store, &url);

        let mut controls: Vec<Control> = Category::ALL
            .iter()
            .map(|&c| Control::category(c, category_control_disabled(record, c, None)))
            .collect();
        controls.push(Control::unmark("Unmark", !status.is_categorized()));

        Some(NovelPlan {
            url,
            title,
            status,
            controls,
        })
    }

    /// Apply a control and return the refreshed plan.
    pub fn handle<A: StorageArea>(
        repo: &Repository<A>,
        clock: &impl Clock,
        page: &NovelPage,
        action: Action,
    ) -> Result<Option<NovelPlan>, NovelHiderError> {
        let store = repo.try_load()?;
        let Some(plan) = Self::plan(&store, page) else {
            return Ok(None);
        };
        let none = ActionContext::none();
        let store = repo.commit(store, &plan.url, &plan.title, action, &none, clock)?;
        Ok(Self::plan(&store, page))
    }
}
