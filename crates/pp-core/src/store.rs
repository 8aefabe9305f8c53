//! Key-value persistence for the two planner records.
//!
//! The store itself is an external collaborator (browser `localStorage` in
//! the web build). Reads and writes may fail; callers decide whether a
//! failure is worth more than a log line.

use crate::error::{PlannerError, Result};
use crate::grid::GridConfig;
use crate::pixels::PixelMap;
use serde::Deserialize;
use std::collections::HashMap;

/// Record holding the serialized [`PixelMap`].
pub const PIXELS_KEY: &str = "pixels";
/// Record holding `{width, height}`.
pub const DIMENSIONS_KEY: &str = "pixelDimensions";

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Used by tests and the command-line exporter.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// Simulates a full or disabled store: every write fails.
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(PlannerError::Storage(format!("quota exceeded writing {key:?}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─── Records ─────────────────────────────────────────────────────────────

/// Load the pixel map. A missing record is an empty map.
pub fn load_pixels(store: &impl KeyValueStore) -> Result<PixelMap> {
    match store.load(PIXELS_KEY)? {
        Some(json) => PixelMap::from_json(&json),
        None => Ok(PixelMap::new()),
    }
}

pub fn save_pixels(store: &mut impl KeyValueStore, pixels: &PixelMap) -> Result<()> {
    store.save(PIXELS_KEY, &pixels.to_json()?)
}

#[derive(Deserialize)]
struct StoredDimensions {
    width: i64,
    height: i64,
}

/// Load the persisted grid dimensions, validated against `max`.
pub fn load_dimensions(store: &impl KeyValueStore, max: u32) -> Result<Option<GridConfig>> {
    let Some(json) = store.load(DIMENSIONS_KEY)? else {
        return Ok(None);
    };
    let decode_err = |reason: String| PlannerError::Decode {
        key: DIMENSIONS_KEY,
        reason,
    };
    let stored: StoredDimensions =
        serde_json::from_str(&json).map_err(|e| decode_err(e.to_string()))?;
    GridConfig::new(stored.width, stored.height, max)
        .map(Some)
        .map_err(|e| decode_err(e.to_string()))
}

pub fn save_dimensions(store: &mut impl KeyValueStore, grid: GridConfig) -> Result<()> {
    let json = serde_json::to_string(&grid).map_err(|e| PlannerError::Storage(e.to_string()))?;
    store.save(DIMENSIONS_KEY, &json)
}
