//! List (discovery) page.
//!
//! Every categorized novel is hidden. Items that have a button container get
//! a Reading / Disliked pair; Reading is disabled when already reading.

use super::{Control, category_control_disabled};
use crate::projections::hidden_set;
use crate::storage::StorageArea;
use crate::{Action, ActionContext, Category, Clock, NovelHiderError, RecordStore, Repository};
use serde::Serialize;

/// One novel entry scraped from a list page.
///
/// `url` and `title` are `None` when the item's link or title anchor is
/// missing; such items are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub url: Option<String>,
    pub title: Option<String>,
    pub has_button_container: bool,
}

impl ListItem {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            title: Some(title.into()),
            has_button_container: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemPlan {
    pub url: String,
    pub title: String,
    pub hidden: bool,
    /// Empty when the item has no button container.
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListPlan {
    pub items: Vec<ListItemPlan>,
    pub hidden_count: usize,
}

/// Controller for list pages.
pub struct ListSurface;

impl ListSurface {
    /// Plan the list view.
    pub fn plan(store: &RecordStore, items: &[ListItem]) -> ListPlan {
        let hidden = hidden_set(store);
        let mut plan = ListPlan::default();

        for item in items {
            let (Some(url), Some(title)) = (item.url.as_ref(), item.title.as_ref()) else {
                continue;
            };
            let title = title.trim();
            let is_hidden = hidden.contains(url.as_str());
            if is_hidden {
                plan.hidden_count += 1;
            }

            let controls = if item.has_button_container {
                let record = store.get(url);
                vec![
                    Control::category(
                        Category::Reading,
                        category_control_disabled(record, Category::Reading, None),
                    ),
                    Control::category(Category::Disliked, false),
                ]
            } else {
                Vec::new()
            };

            plan.items.push(ListItemPlan {
                url: url.clone(),
                title: title.to_string(),
                hidden: is_hidden,
                controls,
            });
        }

        tracing::debug!(hidden = plan.hidden_count, "list view planned");
        plan
    }

    /// Categorize a list item. Returns `true` when the item should now be
    /// hidden on the current page.
    pub fn handle<A: StorageArea>(
        repo: &Repository<A>,
        clock: &impl Clock,
        item: &ListItemPlan,
        action: Action,
    ) -> Result<bool, NovelHiderError> {
        let none = ActionContext::none();
        let store = repo.categorize(&item.url, &item.title, action, &none, clock)?;
        Ok(match action {
            Action::Categorize(_) => hidden_set(&store).contains(&item.url),
            Action::Unmark => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryArea;
    use crate::{ManualClock, NovelRecord, Timestamp};

    #[test]
    fn categorized_items_are_hidden_and_counted() {
        let store = RecordStore::from_records([
            NovelRecord::new("a", "A", Category::Reading, Timestamp(1)),
            NovelRecord::new("b", "B", Category::Completed, Timestamp(1)),
        ]);
        let items = [
            ListItem::new("a", " A "),
            ListItem::new("b", "B"),
            ListItem::new("c", "C"),
            ListItem {
                url: None,
                title: Some("broken".into()),
                has_button_container: true,
            },
        ];

        let plan = ListSurface::plan(&store, &items);

        assert_eq!(plan.items.len(), 3);
        assert_eq!(plan.hidden_count, 2);
        assert_eq!(plan.items[0].title, "A");
        assert!(plan.items[0].controls[0].disabled);
        assert!(!plan.items[1].controls[0].disabled);
        assert!(!plan.items[2].hidden);
    }

    #[test]
    fn missing_container_means_no_controls() {
        let mut item = ListItem::new("a", "A");
        item.has_button_container = false;

        let plan = ListSurface::plan(&RecordStore::new(), &[item]);
        assert!(plan.items[0].controls.is_empty());
    }

    #[test]
    fn disliking_hides_item() {
        let repo = Repository::new(MemoryArea::new());
        let clock = ManualClock::starting_at(1);
        let plan = ListSurface::plan(&repo.load(), &[ListItem::new("a", "A")]);

        let hide = ListSurface::handle(&repo, &clock, &plan.items[0], Category::Disliked.into())
            .expect("handle");

        assert!(hide);
        assert_eq!(repo.list().len(), 1);
    }
}
