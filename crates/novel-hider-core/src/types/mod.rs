//! # Core Type Definitions
//!
//! This module contains the domain types shared by every layer:
//! - Status values (`Category`, `Action`)
//! - The persisted record (`NovelRecord`, `ChapterMark`, `Timestamp`)
//! - Engine input context (`ActionContext`)
//! - Error types (`NovelHiderError`)
//!
//! ## Wire Shape
//!
//! `NovelRecord` serializes to the camelCase object stored in the browser
//! slot. Deserialization goes through [`WireRecord`](crate::formats::WireRecord),
//! which is the only place legacy or partial entries are normalized.

use crate::formats::WireRecord;
use crate::primitives::UNMARK_TOKEN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// A user-assigned reading status.
///
/// Absence of a record means "uncategorized"; there is no
/// variant for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reading,
    Disliked,
    Hiatus,
    Completed,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Reading,
        Category::Disliked,
        Category::Hiatus,
        Category::Completed,
    ];

    /// Lowercase key used on the wire and in CLI arguments.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Disliked => "disliked",
            Self::Hiatus => "hiatus",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label shown on controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Disliked => "Disliked",
            Self::Hiatus => "Hiatus",
            Self::Completed => "Completed",
        }
    }

    /// Whether records in this category carry chapter tracking.
    #[must_use]
    pub const fn tracks_chapter(self) -> bool {
        matches!(self, Self::Reading | Self::Hiatus)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = NovelHiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reading" => Ok(Self::Reading),
            "disliked" => Ok(Self::Disliked),
            "hiatus" => Ok(Self::Hiatus),
            "completed" => Ok(Self::Completed),
            _ => Err(NovelHiderError::UnknownCategory(s.to_string())),
        }
    }
}

// =============================================================================
// ACTION
// =============================================================================

/// A requested change: assign a category, or remove the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Categorize(Category),
    Unmark,
}

impl From<Category> for Action {
    fn from(category: Category) -> Self {
        Self::Categorize(category)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorize(c) => c.fmt(f),
            Self::Unmark => f.write_str(UNMARK_TOKEN),
        }
    }
}

impl FromStr for Action {
    type Err = NovelHiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(UNMARK_TOKEN) || trimmed.eq_ignore_ascii_case("unmark") {
            return Ok(Self::Unmark);
        }
        trimmed.parse().map(Self::Categorize)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

// =============================================================================
// CHAPTER TRACKING
// =============================================================================

/// The chapter a reader last marked while reading or on hiatus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterMark {
    pub url: String,
    pub title: String,
}

impl ChapterMark {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Extra data carried by an action.
///
/// Only chapter surfaces populate `chapter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    pub chapter: Option<ChapterMark>,
}

impl ActionContext {
    /// Context for actions from list, novel and options surfaces.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Context for actions from a chapter surface.
    #[must_use]
    pub fn chapter(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            chapter: Some(ChapterMark::new(url, title)),
        }
    }
}

// =============================================================================
// NOVEL RECORD
// =============================================================================

/// One tracked novel, keyed by its normalized page URL.
///
/// `chapter` is only ever `Some` for categories where
/// [`Category::tracks_chapter`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireRecord", try_from = "WireRecord")]
pub struct NovelRecord {
    pub url: String,
    pub title: String,
    pub category: Category,
    pub chapter: Option<ChapterMark>,
    pub last_updated: Timestamp,
}

impl NovelRecord {
    /// Fresh record with no chapter tracking.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        last_updated: Timestamp,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            category,
            chapter: None,
            last_updated,
        }
    }

    /// Attach chapter tracking. Ignored for categories that do not track.
    #[must_use]
    pub fn with_chapter(mut self, chapter: ChapterMark) -> Self {
        if self.category.tracks_chapter() {
            self.chapter = Some(chapter);
        }
        self
    }

    #[must_use]
    pub fn current_chapter_url(&self) -> Option<&str> {
        self.chapter.as_ref().map(|c| c.url.as_str())
    }

    #[must_use]
    pub fn current_chapter_title(&self) -> Option<&str> {
        self.chapter.as_ref().map(|c| c.title.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Novel Hider core and console.
///
/// Nothing here is fatal to a page surface: adapters degrade to "no visible
/// change" when an operation returns `Err`.
#[derive(Debug, Error)]
pub enum NovelHiderError {
    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The database backing a storage area failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A category string is not one of the four statuses.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A list filter string is neither `all` nor a category.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A sort order string is neither ascending nor descending.
    #[error("Unknown sort order: {0}")]
    UnknownOrder(String),

    /// The requested storage backend does not exist.
    #[error("Unknown storage backend: {0}")]
    UnknownBackend(String),

    /// No site configuration matches the hostname.
    #[error("Site not supported: {0}")]
    SiteNotSupported(String),

    /// A configuration file could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
