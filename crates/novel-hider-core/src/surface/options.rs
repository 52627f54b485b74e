//! Options page: the full tracked list with counts, a category filter and a
//! sort toggle.
//!
//! The filter and order are UI-local state owned by [`OptionsSurface`] and
//! passed explicitly to the projections.

use super::{Control, category_control_disabled};
use crate::primitives::{CONTINUE_READING_LABEL, UNKNOWN_TITLE};
use crate::projections::{CategoryCounts, Filter, SortOrder, category_counts, filtered_sorted};
use crate::storage::StorageArea;
use crate::{
    Action, ActionContext, Category, Clock, NovelHiderError, NovelRecord, RecordStore, Repository,
};
use serde::Serialize;

/// Link back to the tracked chapter of a reading/hiatus novel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinueLink {
    /// `[Reading]` or `[Hiatus]` prefix label.
    pub label: String,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsRow {
    pub url: String,
    pub title: String,
    pub category: Category,
    pub category_label: String,
    pub continue_link: Option<ContinueLink>,
    pub controls: Vec<Control>,
}

impl OptionsRow {
    fn from_record(record: &NovelRecord) -> Self {
        let mut controls: Vec<Control> = Category::ALL
            .iter()
            .map(|&c| Control::category(c, category_control_disabled(Some(record), c, None)))
            .collect();
        controls.push(Control::unmark("Unmark", false));

        let continue_link = record
            .chapter
            .as_ref()
            .filter(|_| record.category.tracks_chapter())
            .map(|chapter| ContinueLink {
                label: record.category.label().to_string(),
                url: chapter.url.clone(),
                text: if chapter.title.is_empty() {
                    CONTINUE_READING_LABEL.to_string()
                } else {
                    chapter.title.clone()
                },
            });

        Self {
            url: record.url.clone(),
            title: record.title.clone(),
            category: record.category,
            category_label: record.category.label().to_string(),
            continue_link,
            controls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsView {
    pub counts: CategoryCounts,
    pub rows: Vec<OptionsRow>,
    /// Shown instead of rows when the filtered listing is empty.
    pub empty_message: Option<String>,
}

/// Controller for the options page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsSurface {
    filter: Filter,
    order: SortOrder,
}

impl OptionsSurface {
    /// All categories, oldest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(filter: Filter, order: SortOrder) -> Self {
        Self { filter, order }
    }

    #[must_use]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    #[must_use]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Change the filter. Returns `false` when it was already selected.
    pub fn set_filter(&mut self, filter: Filter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    pub fn toggle_order(&mut self) {
        self.order = self.order.toggled();
    }

    /// Render the listing for the current filter and order.
    #[must_use]
    pub fn view(&self, store: &RecordStore) -> OptionsView {
        let rows: Vec<OptionsRow> = filtered_sorted(store, self.filter, self.order)
            .into_iter()
            .map(OptionsRow::from_record)
            .collect();

        let empty_message = rows.is_empty().then(|| {
            let label = match self.filter {
                Filter::All => "Tracked",
                Filter::Only(c) => c.label(),
            };
            format!("No novels categorized as {label} found.")
        });

        OptionsView {
            counts: category_counts(store),
            rows,
            empty_message,
        }
    }

    /// Apply a row action and return the re-rendered view.
    ///
    /// A URL without a record, or whose record has no title, is written with
    /// a placeholder title.
    pub fn handle<A: StorageArea>(
        &self,
        repo: &Repository<A>,
        clock: &impl Clock,
        url: &str,
        action: Action,
    ) -> Result<OptionsView, NovelHiderError> {
        let store = repo.try_load()?;
        let title = store
            .get(url)
            .map(|r| r.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let store = repo.commit(store, url, &title, action, &ActionContext::none(), clock)?;
        Ok(self.view(&store))
    }

    /// Clear all records and return the empty view.
    pub fn clear_all<A: StorageArea>(
        &self,
        repo: &Repository<A>,
    ) -> Result<OptionsView, NovelHiderError> {
        repo.clear()?;
        Ok(self.view(&RecordStore::new()))
    }
}
