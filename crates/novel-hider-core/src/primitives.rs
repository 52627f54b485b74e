//! # Primitives
//!
//! Fixed constants shared by the store, engine and surfaces.
//!
//! These values are part of the persisted contract with existing users'
//! storage and must not change between releases.

use crate::Category;

/// Name of the storage slot that holds the record collection.
pub const STORAGE_KEY: &str = "hiddenNovelsMap";

/// Action token used by controls and the console for "remove the record".
pub const UNMARK_TOKEN: &str = "unmarked";

/// Category assigned to legacy records that were stored without one.
///
/// The first release only knew how to hide disliked novels.
pub const LEGACY_DEFAULT_CATEGORY: Category = Category::Disliked;

/// Categories that hide a novel from list views.
///
/// All four hide: a novel being read is meant to leave the discovery list.
pub const HIDDEN_CATEGORIES: [Category; 4] = Category::ALL;

/// Chapter title used when a chapter surface cannot find its heading.
pub const UNKNOWN_CHAPTER_TITLE: &str = "Unknown Chapter";

/// Title seeded when the options page acts on a URL it has no record for.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Link text for a tracked chapter that has no title.
pub const CONTINUE_READING_LABEL: &str = "Continue Reading";

/// Path suffix of a novel's table-of-contents page.
pub const NOVEL_INDEX_SUFFIX: &str = "/index.html";

/// Maximum size of the persisted slot that `load` will decode (16 MB).
///
/// Browser local storage quotas sit well below this.
pub const MAX_SLOT_SIZE: usize = 16 * 1024 * 1024;
