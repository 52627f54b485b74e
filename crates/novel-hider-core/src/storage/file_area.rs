//! JSON-file storage area.
//!
//! The file holds one JSON object whose keys are slot names, the same layout a
//! browser's extension local storage exports:
//!
//! ```json
//! { "hiddenNovelsMap": [ ... ] }
//! ```
//!
//! Slot values must themselves be JSON. A write rewrites the whole file
//! through a sibling temp file and a rename.

use super::StorageArea;
use crate::NovelHiderError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A storage area backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileArea {
    path: PathBuf,
}

impl FileArea {
    /// Use the file at `path`. It is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, NovelHiderError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = std::fs::read(&self.path).map_err(|e| {
            NovelHiderError::IoError(format!("Read {}: {}", self.path.display(), e))
        })?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(NovelHiderError::DeserializationError(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(NovelHiderError::DeserializationError(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_object(&self, map: &Map<String, Value>) -> Result<(), NovelHiderError> {
        let data = serde_json::to_vec_pretty(map)
            .map_err(|e| NovelHiderError::SerializationError(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, &data)
            .map_err(|e| NovelHiderError::IoError(format!("Write {}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            NovelHiderError::IoError(format!("Replace {}: {}", self.path.display(), e))
        })
    }
}

impl StorageArea for FileArea {
    fn get(&self, slot: &str) -> Result<Option<Vec<u8>>, NovelHiderError> {
        let map = self.read_object()?;
        map.get(slot)
            .map(|value| {
                serde_json::to_vec(value)
                    .map_err(|e| NovelHiderError::SerializationError(e.to_string()))
            })
            .transpose()
    }

    fn set(&self, slot: &str, value: &[u8]) -> Result<(), NovelHiderError> {
        let parsed: Value = serde_json::from_slice(value).map_err(|e| {
            NovelHiderError::SerializationError(format!("slot value is not JSON: {}", e))
        })?;
        let mut map = self.read_object()?;
        map.insert(slot.to_string(), parsed);
        self.write_object(&map)
    }
}
