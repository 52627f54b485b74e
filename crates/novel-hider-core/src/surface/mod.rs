//! # Surfaces
//!
//! Controllers for the four page contexts that consume the core: list, novel
//! detail, chapter reader, and options.
//!
//! A page adapter extracts plain data from the DOM (URLs, titles, which
//! anchors exist) and hands it to a controller. The controller returns a
//! plan: which items to hide, which controls to render, and which of those are
//! disabled. On a click the adapter calls the controller's `handle`, which runs
//! one read-modify-write cycle through the [`Repository`](crate::Repository)
//! and returns the re-derived plan.
//!
//! When required page data is missing the plan builders return `None`; the
//! adapter renders nothing and the page is not treated as that surface.

pub mod chapter;
pub mod list;
pub mod novel;
pub mod options;
pub mod site;

pub use chapter::{ChapterPage, ChapterPlan, ChapterSurface};
pub use list::{ListItem, ListItemPlan, ListPlan, ListSurface};
pub use novel::{NovelPage, NovelPlan, NovelSurface};
pub use options::{ContinueLink, OptionsRow, OptionsSurface, OptionsView};
pub use site::{SiteConfig, SiteRegistry};

use crate::projections::Status;
use crate::{Action, Category, NovelRecord};
use serde::Serialize;

// =============================================================================
// CONTROLS
// =============================================================================

/// One clickable control on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Action token sent back to `handle` (`reading`, ..., `unmarked`).
    pub action: String,
    pub label: String,
    pub disabled: bool,
}

impl Control {
    fn category(category: Category, disabled: bool) -> Self {
        Self {
            action: category.key().to_string(),
            label: category.label().to_string(),
            disabled,
        }
    }

    fn unmark(label: &str, disabled: bool) -> Self {
        Self {
            action: Action::Unmark.to_string(),
            label: label.to_string(),
            disabled,
        }
    }
}

/// Whether the control for `category` is disabled for a novel.
///
/// The control for the current category is disabled. On chapter surfaces
/// (`surface_chapter` is `Some`) it is disabled only when the tracked chapter
/// is also this chapter.
#[must_use]
pub fn category_control_disabled(
    record: Option<&NovelRecord>,
    category: Category,
    surface_chapter: Option<&str>,
) -> bool {
    let Some(record) = record else {
        return false;
    };
    if record.category != category {
        return false;
    }
    match surface_chapter {
        None => true,
        Some(chapter_url) => record.current_chapter_url() == Some(chapter_url),
    }
}

/// Serialize a [`Status`] as its display string.
fn serialize_status<S: serde::Serializer>(
    status: &Status,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(status)
}

// =============================================================================
// PAGE CLASSIFICATION
// =============================================================================

/// Which surface a page is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Chapter,
    Novel,
    List,
}

impl PageKind {
    /// Classify a page from which selector anchors are present.
    ///
    /// Chapter anchors win over novel anchors; anything else is a list.
    pub fn detect(config: &SiteConfig, is_present: impl Fn(&str) -> bool) -> Self {
        if is_present(&config.chapter_page_content) || is_present(&config.chapter_tools_container) {
            Self::Chapter
        } else if is_present(&config.main_page_content)
            || is_present(&config.single_novel_container)
        {
            Self::Novel
        } else {
            Self::List
        }
    }
}
