//! The identifier → IP mapping persisted in `pool.json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// In-memory pool, kept in first-insertion order so a rebuilt file diffs
/// cleanly against the one it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool {
    entries: Map<String, Value>,
}

impl Pool {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadPool {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| Error::ParsePool {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Point `id` at `ip`, overwriting any previous address in place.
    pub fn insert(&mut self, id: &str, ip: &str) {
        self.entries.insert(id.to_string(), Value::String(ip.to_string()));
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
