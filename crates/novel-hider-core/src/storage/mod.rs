//! # Storage Areas
//!
//! The local key-value area that holds the record slot.
//!
//! Only two operations are required of an area: read a slot and overwrite a
//! slot. Three implementations are provided:
//! - `MemoryArea`: in-process map, clones share state
//! - `FileArea`: one JSON object file, like a browser's local storage
//! - `RedbArea`: an embedded redb database, one ACID transaction per write

mod file_area;
mod redb_area;

pub use file_area::FileArea;
pub use redb_area::RedbArea;

use crate::NovelHiderError;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// =============================================================================
// STORAGEAREA TRAIT
// =============================================================================

/// A named-slot key-value persistence area.
///
/// Writes replace the whole slot value; there is no partial update.
pub trait StorageArea {
    /// Read the raw bytes stored under `slot`, or `None` if never written.
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError>;

    /// Overwrite `slot` with `value`.
    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError>;
}

impl<A: StorageArea + ?Sized> StorageArea for &A {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError> {
        (**self).set(slot, value)
    }
}

impl<A: StorageArea + ?Sized> StorageArea for Box<A> {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError> {
        (**self).set(slot, value)
    }
}

// =============================================================================
// MEMORY AREA
// =============================================================================

/// In-memory area. Cloning yields another handle onto the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryArea {
    slots: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, NovelHiderError> {
        self.slots
            .lock()
            .map_err(|_| NovelHiderError::StorageError("memory area lock poisoned".to_string()))
    }
}

impl StorageArea for MemoryArea {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError> {
        Ok(self.lock()?.get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError> {
        self.lock()?.insert(slot.to_string(), value.to_vec());
        Ok(())
    }
}
