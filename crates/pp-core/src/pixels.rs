use crate::error::{PlannerError, Result};
use crate::grid::GridConfig;
use crate::key::CellKey;
use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse map of painted cells. An absent key is an unpainted cell.
///
/// Serializes as the persisted `pixels` record: a JSON object keyed by
/// `"x,y"` whose values are palette colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelMap(BTreeMap<CellKey, Color>);

impl PixelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous color.
    pub fn insert(&mut self, key: CellKey, color: Color) -> Option<Color> {
        self.0.insert(key, color)
    }

    pub fn get(&self, key: CellKey) -> Option<&Color> {
        self.0.get(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &Color)> {
        self.0.iter().map(|(k, c)| (*k, c))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drop every entry outside `grid`. Returns how many were removed.
    pub fn retain_within(&mut self, grid: GridConfig) -> usize {
        let before = self.0.len();
        self.0.retain(|k, _| grid.contains(*k));
        before - self.0.len()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PlannerError::Storage(e.to_string()))
    }

    /// Decode a persisted `pixels` record.
    ///
    /// The record must be a JSON object, but individual entries with a
    /// malformed key or color are skipped with a warning so one bad entry
    /// does not cost the whole drawing.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| PlannerError::Decode {
                key: crate::store::PIXELS_KEY,
                reason: e.to_string(),
            })?;

        let mut map = BTreeMap::new();
        for (raw_key, raw_color) in raw {
            let key = match raw_key.parse::<CellKey>() {
                Ok(k) => k,
                Err(e) => {
                    log::warn!("skipping stored pixel: {e}");
                    continue;
                }
            };
            match serde_json::from_value::<Color>(raw_color) {
                Ok(color) => {
                    map.insert(key, color);
                }
                Err(e) => log::warn!("skipping stored pixel {key}: {e}"),
            }
        }
        Ok(Self(map))
    }
}

impl FromIterator<(CellKey, Color)> for PixelMap {
    fn from_iter<I: IntoIterator<Item = (CellKey, Color)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
