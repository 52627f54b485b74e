//! # redb-backed Storage Area
//!
//! Slots live in a single redb table, `slots: &str -> &[u8]`.
//!
//! Each `set` is its own write transaction, so a slot is always either the old
//! value or the new one, never a mix. This does not serialize read-modify-write
//! cycles across handles; see the repository docs.

use super::StorageArea;
use crate::NovelHiderError;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

/// Table for slots: slot name -> raw slot bytes
const SLOTS: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

/// A storage area kept in a redb database file.
pub struct RedbArea {
    db: Database,
}

impl std::fmt::Debug for RedbArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbArea").finish_non_exhaustive()
    }
}

fn storage_err(e: impl std::fmt::Display) -> NovelHiderError {
    NovelHiderError::StorageError(e.to_string())
}

impl RedbArea {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NovelHiderError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Create the table up front so readers never see it missing.
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(SLOTS).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }

    /// Compact the database file.
    pub fn compact(&mut self) -> Result<(), NovelHiderError> {
        self.db.compact().map_err(storage_err)?;
        Ok(())
    }
}

impl StorageArea for RedbArea {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(SLOTS).map_err(storage_err)?;
        let value = table
            .get(slot)
            .map_err(storage_err)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(storage_err)?;
            table.insert(slot, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }
}
