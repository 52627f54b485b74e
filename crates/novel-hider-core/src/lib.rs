//! # novel-hider-core
//!
//! The record store and categorization engine behind Novel Hider.
//!
//! A reader tags web novels as reading, disliked, hiatus or completed. The
//! tagged map lives in a single storage slot, is rewritten whole on every
//! change, and is read back by four page surfaces (list, novel, chapter and
//! options) which derive what to hide and which controls to offer.
//!
//! ## Layout
//!
//! - `types` / `primitives`: the record model and fixed constants
//! - `formats`: the persisted wire form and its normalization on load
//! - `store` / `engine`: the in-memory map and the single mutation rule
//! - `storage` / `repository`: storage areas and the read-modify-write cycle
//! - `projections`: hidden set, status, filtered listings and counts
//! - `surface`: per-page controllers and site selector configuration
//!
//! The core is synchronous and has no network dependencies.

// =============================================================================
// MODULES
// =============================================================================

pub mod clock;
pub mod engine;
pub mod formats;
pub mod links;
pub mod primitives;
pub mod projections;
pub mod repository;
pub mod storage;
pub mod store;
pub mod surface;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    Action, ActionContext, Category, ChapterMark, NovelHiderError, NovelRecord, Timestamp,
};

// =============================================================================
// RE-EXPORTS: Engine and Store
// =============================================================================

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{CategorizationEngine, Outcome};
pub use repository::Repository;
pub use storage::{FileArea, MemoryArea, RedbArea, StorageArea};
pub use store::RecordStore;

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{
    WireRecord, records_from_bytes, records_to_bytes, store_from_bytes, store_to_bytes,
};

// =============================================================================
// RE-EXPORTS: Projections and Surfaces
// =============================================================================

pub use projections::{
    CategoryCounts, Filter, SortOrder, Status, category_counts, current_status, filtered_sorted,
    hidden_set,
};
pub use surface::{
    ChapterPage, ChapterPlan, ChapterSurface, Control, ListItem, ListItemPlan, ListPlan,
    ListSurface, NovelPage, NovelPlan, NovelSurface, OptionsRow, OptionsSurface, OptionsView,
    PageKind, SiteConfig, SiteRegistry,
};
