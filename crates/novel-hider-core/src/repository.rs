//! # Repository
//!
//! Load and save the whole record collection as one snapshot in a named slot
//! of a [`StorageArea`].
//!
//! ## Consistency
//!
//! A `save` that returns before the next `load` is visible to that `load`.
//! Nothing more is promised: two repositories over the same area (two open
//! tabs) each read, modify and overwrite the full collection, so a write from
//! one can silently discard a write from the other. Last save wins.

use crate::engine::CategorizationEngine;
use crate::formats::{store_from_bytes, store_to_bytes};
use crate::primitives::STORAGE_KEY;
use crate::storage::StorageArea;
use crate::{Action, ActionContext, Clock, NovelHiderError, NovelRecord, RecordStore};

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a storage error and fall back to the default value.
#[inline]
fn log_and_default<T: Default>(result: Result<T, NovelHiderError>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "{} failed, using empty collection", context);
            T::default()
        }
    }
}

/// Record collection persisted in one slot of a storage area.
#[derive(Debug, Clone)]
pub struct Repository<A> {
    area: A,
    slot: String,
}

impl<A: StorageArea> Repository<A> {
    /// Repository over the standard slot.
    pub fn new(area: A) -> Self {
        Self::with_slot(area, STORAGE_KEY)
    }

    /// Repository over a custom slot name.
    pub fn with_slot(area: A, slot: impl Into<String>) -> Self {
        Self {
            area,
            slot: slot.into(),
        }
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    #[must_use]
    pub fn area(&self) -> &A {
        &self.area
    }

    /// Read the collection, normalizing every entry.
    ///
    /// Never fails: a missing, unreadable or malformed slot yields an empty
    /// store and a warning. For read-only views; write paths go through
    /// [`try_load`](Self::try_load).
    pub fn load(&self) -> RecordStore {
        log_and_default(self.try_load(), "load")
    }

    /// Read the collection, surfacing storage and decode errors.
    pub fn try_load(&self) -> Result<RecordStore, NovelHiderError> {
        match self.area.get(&self.slot)? {
            None => Ok(RecordStore::new()),
            Some(bytes) => store_from_bytes(&bytes),
        }
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&self, store: &RecordStore) -> Result<(), NovelHiderError> {
        let bytes = store_to_bytes(store)?;
        self.area.set(&self.slot, &bytes)?;
        tracing::debug!(slot = %self.slot, records = store.len(), "saved collection");
        Ok(())
    }

    /// Replace the collection with an empty one.
    pub fn clear(&self) -> Result<(), NovelHiderError> {
        self.save(&RecordStore::new())?;
        tracing::info!(slot = %self.slot, "cleared all records");
        Ok(())
    }

    // =========================================================================
    // READ-MODIFY-WRITE
    // =========================================================================

    /// Load, apply one action, and save if anything changed.
    ///
    /// A slot that cannot be read or decoded aborts the cycle with the error
    /// and nothing is written.
    pub fn categorize(
        &self,
        url: &str,
        title: &str,
        action: Action,
        context: &ActionContext,
        clock: &impl Clock,
    ) -> Result<RecordStore, NovelHiderError> {
        let store = self.try_load()?;
        self.commit(store, url, title, action, context, clock)
    }

    /// Apply one action to a store the caller already loaded, and save if
    /// anything changed.
    ///
    /// Returns the store as it stands after the action.
    pub fn commit(
        &self,
        mut store: RecordStore,
        url: &str,
        title: &str,
        action: Action,
        context: &ActionContext,
        clock: &impl Clock,
    ) -> Result<RecordStore, NovelHiderError> {
        let now = clock.now();
        let changed =
            CategorizationEngine::apply_to_store(&mut store, url, title, action, context, now);
        if changed {
            self.save(&store)?;
            match action {
                Action::Unmark => tracing::info!(url, "removed category"),
                Action::Categorize(category) => {
                    tracing::info!(url, title, %category, "saved novel");
                }
            }
        }
        Ok(store)
    }

    // =========================================================================
    // OPERATOR CONSOLE
    // =========================================================================

    /// Every stored record, in insertion order.
    pub fn list(&self) -> Vec<NovelRecord> {
        self.load().into_records()
    }

    /// Remove one record by URL. Returns `false` (and writes nothing) when the
    /// URL is not stored.
    pub fn remove(&self, url: &str) -> Result<bool, NovelHiderError> {
        let mut store = self.try_load()?;
        if store.remove(url).is_none() {
            tracing::info!(url, "url not found");
            return Ok(false);
        }
        self.save(&store)?;
        tracing::info!(url, "removed url");
        Ok(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
