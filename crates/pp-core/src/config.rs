//! Planner configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock behavior. Hosts may pass a partial JSON override.

use crate::error::{PlannerError, Result};
use crate::grid::GridConfig;
use crate::model::Rgba;
use serde::{Deserialize, Serialize};

/// What to do with painted cells that fall outside the grid after it shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Keep them; they reappear if the grid grows back.
    #[default]
    Retain,
    /// Drop them from the map (and the store) on shrink.
    Purge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Horizontal viewport space reserved for page chrome.
    pub margin_x: f64,
    /// Vertical viewport space reserved for the toolbar and palette bar.
    pub margin_y: f64,
    /// Upper bound on the on-screen edge of one cell.
    pub max_pixel_size: u32,
    /// Viewports narrower than this start with the small default grid.
    pub small_viewport_width: f64,
    pub small_grid: u32,
    pub large_grid: u32,
    /// Largest accepted grid dimension.
    pub max_dimension: u32,
    /// How long a transient notice stays up.
    pub notice_duration_ms: u32,
    pub background: String,
    pub stale_cells: StalePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            margin_x: 20.0,
            margin_y: 170.0,
            max_pixel_size: 30,
            small_viewport_width: 600.0,
            small_grid: 15,
            large_grid: 25,
            max_dimension: 250,
            notice_duration_ms: 5000,
            background: "#FFFFFF".to_string(),
            stale_cells: StalePolicy::Retain,
        }
    }
}

impl PlannerConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| PlannerError::Decode {
            key: "config",
            reason: e.to_string(),
        })?;
        config.background_rgba()?;
        Ok(config)
    }

    /// The default grid for a first run on a viewport of the given width.
    pub fn default_grid(&self, viewport_width: f64) -> GridConfig {
        let side = if viewport_width < self.small_viewport_width {
            self.small_grid
        } else {
            self.large_grid
        };
        GridConfig::clamped(side, side, self.max_dimension)
    }

    pub fn background_rgba(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.background)
            .ok_or_else(|| PlannerError::InvalidHex(self.background.clone()))
    }
}
