//! # Persistence Format
//!
//! JSON encoding of the record collection held in the storage slot.
//!
//! Format: a JSON array of camelCase record objects, for example
//!
//! ```json
//! [{"url":"https://twkan.com/book/1.html","title":"T","category":"reading",
//!   "currentChapterUrl":"https://twkan.com/txt/1/2","currentChapterTitle":"Ch 2",
//!   "lastUpdated":1700000000000}]
//! ```
//!
//! ## Normalization
//!
//! Decoding is the single place where stored data is repaired:
//! - missing or empty `category` becomes `disliked`
//! - missing `lastUpdated` becomes 0
//! - missing `title` becomes the empty string
//! - chapter fields are dropped unless the category tracks chapters
//! - a chapter URL without a title gets [`UNKNOWN_CHAPTER_TITLE`]
//! - entries without a `url`, or with an unknown category, are skipped
//!
//! Skipped entries are logged at `warn` and never abort the decode. When
//! decoding into a [`RecordStore`] they are kept verbatim and written back
//! after the records.

use crate::primitives::{LEGACY_DEFAULT_CATEGORY, MAX_SLOT_SIZE, UNKNOWN_CHAPTER_TITLE};
use crate::{Category, ChapterMark, NovelHiderError, NovelRecord, RecordStore, Timestamp};
use serde::{Deserialize, Serialize};

// =============================================================================
// WIRE RECORD
// =============================================================================

/// A record exactly as it appears in storage, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_chapter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_chapter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
}

impl From<NovelRecord> for WireRecord {
    fn from(record: NovelRecord) -> Self {
        let (current_chapter_url, current_chapter_title) = match record.chapter {
            Some(ChapterMark { url, title }) => (Some(url), Some(title)),
            None => (None, None),
        };
        Self {
            url: Some(record.url),
            title: Some(record.title),
            category: Some(record.category.key().to_string()),
            current_chapter_url,
            current_chapter_title,
            last_updated: Some(record.last_updated.as_millis()),
        }
    }
}

impl TryFrom<WireRecord> for NovelRecord {
    type Error = NovelHiderError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let url = wire
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| NovelHiderError::DeserializationError("record has no url".into()))?;

        let category = match wire.category.as_deref() {
            None | Some("") => LEGACY_DEFAULT_CATEGORY,
            Some(raw) => raw.parse::<Category>()?,
        };

        let chapter = if category.tracks_chapter() {
            wire.current_chapter_url
                .filter(|u| !u.is_empty())
                .map(|chapter_url| {
                    let title = wire
                        .current_chapter_title
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| UNKNOWN_CHAPTER_TITLE.to_string());
                    ChapterMark::new(chapter_url, title)
                })
        } else {
            None
        };

        Ok(Self {
            url,
            title: wire.title.unwrap_or_default(),
            category,
            chapter,
            last_updated: Timestamp(wire.last_updated.unwrap_or(0)),
        })
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize records to the slot's JSON array.
///
/// This is a pure transformation - no storage I/O.
pub fn records_to_bytes<'a, I>(records: I) -> Result<Vec<u8>, NovelHiderError>
where
    I: IntoIterator<Item = &'a NovelRecord>,
{
    let wire: Vec<WireRecord> = records.into_iter().cloned().map(WireRecord::from).collect();
    serde_json::to_vec(&wire).map_err(|e| NovelHiderError::SerializationError(e.to_string()))
}

/// Deserialize and normalize records from the slot's JSON.
///
/// `null` decodes as an empty collection. Any other non-array value is an
/// error; individual bad entries are skipped.
pub fn records_from_bytes(bytes: &[u8]) -> Result<Vec<NovelRecord>, NovelHiderError> {
    let mut records = Vec::new();
    decode_entries(bytes, |decoded| {
        if let Ok(record) = decoded {
            records.push(record);
        }
    })?;
    Ok(records)
}

/// Decode the slot into a [`RecordStore`].
///
/// Like [`records_from_bytes`], but entries that fail to decode are retained
/// verbatim in the store so [`store_to_bytes`] writes them back.
pub fn store_from_bytes(bytes: &[u8]) -> Result<RecordStore, NovelHiderError> {
    let mut store = RecordStore::new();
    decode_entries(bytes, |decoded| match decoded {
        Ok(record) => {
            store.insert(record);
        }
        Err(raw) => store.retain_raw(raw),
    })?;
    Ok(store)
}

/// Serialize a store: its records in order, then any retained raw entries.
pub fn store_to_bytes(store: &RecordStore) -> Result<Vec<u8>, NovelHiderError> {
    let mut entries = Vec::with_capacity(store.len() + store.retained().len());
    for record in store {
        let wire = WireRecord::from(record.clone());
        entries.push(
            serde_json::to_value(wire)
                .map_err(|e| NovelHiderError::SerializationError(e.to_string()))?,
        );
    }
    entries.extend(store.retained().iter().cloned());
    serde_json::to_vec(&entries).map_err(|e| NovelHiderError::SerializationError(e.to_string()))
}

/// Walk the slot's entries, handing each one to `visit` as either a decoded
/// record or the raw value that failed to decode.
fn decode_entries(
    bytes: &[u8],
    mut visit: impl FnMut(Result<NovelRecord, serde_json::Value>),
) -> Result<(), NovelHiderError> {
    if bytes.len() > MAX_SLOT_SIZE {
        return Err(NovelHiderError::DeserializationError(format!(
            "Slot size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SLOT_SIZE
        )));
    }

    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| NovelHiderError::DeserializationError(e.to_string()))?;

    let entries = match value {
        serde_json::Value::Null => return Ok(()),
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(NovelHiderError::DeserializationError(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )));
        }
    };

    for (index, entry) in entries.into_iter().enumerate() {
        match NovelRecord::deserialize(&entry) {
            Ok(record) => visit(Ok(record)),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable stored record");
                visit(Err(entry));
            }
        }
    }
    Ok(())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// TESTS
// =============================================================================
