//! Grid model: cell/screen coordinate mapping, scale, and the paint map.
//!
//! The model is pure state plus coordinate math. It never renders and never
//! touches storage; the session layer persists after a mutation reports a
//! change.

use crate::config::{PlannerConfig, StalePolicy};
use crate::error::{PlannerError, Result};
use crate::key::CellKey;
use crate::model::Color;
use crate::pixels::PixelMap;
use serde::Serialize;

/// Default upper bound on the on-screen edge of one cell.
pub const MAX_PIXEL_SIZE: u32 = 30;

/// Browser viewport (window inner size) in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

// ─── Grid dimensions ─────────────────────────────────────────────────────

/// Cell counts of the paint grid. Always at least 1×1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridConfig {
    width: u32,
    height: u32,
}

impl GridConfig {
    /// Validated constructor: both sides must lie in `1..=max`.
    pub fn new(width: i64, height: i64, max: u32) -> Result<Self> {
        Ok(Self {
            width: check_dimension(width, max)?,
            height: check_dimension(height, max)?,
        })
    }

    /// Clamp both sides into `1..=max`.
    pub fn clamped(width: u32, height: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            width: width.clamp(1, max),
            height: height.clamp(1, max),
        }
    }

    /// Parse user-typed dimension fields.
    pub fn parse(width: &str, height: &str, max: u32) -> Result<Self> {
        Ok(Self {
            width: parse_dimension(width, max)?,
            height: parse_dimension(height, max)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, key: CellKey) -> bool {
        key.x < self.width && key.y < self.height
    }

    /// Whether `self` is smaller than `other` along either axis.
    pub fn shrinks_from(&self, other: &GridConfig) -> bool {
        self.width < other.width || self.height < other.height
    }
}

fn check_dimension(value: i64, max: u32) -> Result<u32> {
    if value < 1 || value > i64::from(max) {
        return Err(PlannerError::InvalidDimension {
            input: value.to_string(),
            max,
        });
    }
    Ok(value as u32)
}

/// Parse one dimension field. Accepts surrounding whitespace and a
/// trailing `.0` (number inputs sometimes report integers that way).
pub fn parse_dimension(input: &str, max: u32) -> Result<u32> {
    let invalid = || PlannerError::InvalidDimension {
        input: input.to_string(),
        max,
    };
    let trimmed = input.trim();
    let value = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = trimmed.parse::<f64>().map_err(|_| invalid())?;
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(invalid());
            }
            f as i64
        }
    };
    check_dimension(value, max).map_err(|_| invalid())
}

// ─── Scale ───────────────────────────────────────────────────────────────

/// Largest cell edge (≤ `max_pixel_size`) such that the whole grid fits the
/// viewport minus reserved chrome. Never below 1.
pub fn recompute_scale(viewport: Viewport, grid: GridConfig, config: &PlannerConfig) -> u32 {
    let fit_x = ((viewport.width - config.margin_x) / f64::from(grid.width)).floor();
    let fit_y = ((viewport.height - config.margin_y) / f64::from(grid.height)).floor();
    if fit_x.is_nan() || fit_y.is_nan() {
        return 1;
    }
    let size = fit_x.min(fit_y).min(f64::from(config.max_pixel_size));
    if size < 1.0 { 1 } else { size as u32 }
}

// ─── View state ──────────────────────────────────────────────────────────

/// Transient per-surface state. Recomputed on resize, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub pixel_size: u32,
    pub hover: Option<CellKey>,
    pub show_grid: bool,
    /// Suppresses painting (e.g. while a clear confirmation is pending).
    pub paused: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pixel_size: MAX_PIXEL_SIZE,
            hover: None,
            show_grid: false,
            paused: false,
        }
    }
}

// ─── Model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GridModel {
    grid: GridConfig,
    pixels: PixelMap,
    view: ViewState,
}

impl GridModel {
    pub fn new(grid: GridConfig, pixels: PixelMap) -> Self {
        Self {
            grid,
            pixels,
            view: ViewState::default(),
        }
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn pixels(&self) -> &PixelMap {
        &self.pixels
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn pixel_size(&self) -> u32 {
        self.view.pixel_size
    }

    pub fn hover(&self) -> Option<CellKey> {
        self.view.hover
    }

    /// Surface size in device pixels: `width*pixelSize × height*pixelSize`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.grid.width * self.view.pixel_size,
            self.grid.height * self.view.pixel_size,
        )
    }

    /// Map a pointer position to the cell under it, or `None` when the
    /// point is off the grid.
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64) -> Option<CellKey> {
        if !(screen_x.is_finite() && screen_y.is_finite()) || screen_x < 0.0 || screen_y < 0.0 {
            return None;
        }
        let size = f64::from(self.view.pixel_size);
        let cx = (screen_x / size).floor();
        let cy = (screen_y / size).floor();
        if cx >= f64::from(self.grid.width) || cy >= f64::from(self.grid.height) {
            return None;
        }
        Some(CellKey::new(cx as u32, cy as u32))
    }

    /// Top-left corner of a cell's square on the surface.
    pub fn cell_to_screen(&self, key: CellKey) -> (f64, f64) {
        let size = f64::from(self.view.pixel_size);
        (f64::from(key.x) * size, f64::from(key.y) * size)
    }

    /// Paint `key` with a snapshot of `color`. Returns `true` when the map
    /// changed, which is the caller's cue to persist.
    pub fn paint(&mut self, key: Option<CellKey>, color: &Color) -> bool {
        if self.view.paused {
            return false;
        }
        let Some(key) = key else {
            return false;
        };
        if !self.grid.contains(key) {
            log::trace!("paint outside grid ignored: {key}");
            return false;
        }
        if self.pixels.get(key) == Some(color) {
            return false;
        }
        self.pixels.insert(key, color.clone());
        true
    }

    /// Returns `true` when the hover cell changed.
    pub fn set_hover(&mut self, key: Option<CellKey>) -> bool {
        let changed = self.view.hover != key;
        self.view.hover = key;
        changed
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.view.show_grid = show;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.view.paused = paused;
    }

    pub fn set_pixel_size(&mut self, size: u32) {
        self.view.pixel_size = size.max(1);
    }

    /// Recompute the cell edge for a new viewport. Returns `true` when the
    /// surface size changes.
    pub fn rescale(&mut self, viewport: Viewport, config: &PlannerConfig) -> bool {
        let size = recompute_scale(viewport, self.grid, config);
        let changed = size != self.view.pixel_size;
        self.view.pixel_size = size;
        changed
    }

    /// Switch to new grid dimensions. Returns how many painted cells were
    /// dropped (always 0 under [`StalePolicy::Retain`]).
    pub fn set_dimensions(&mut self, grid: GridConfig, policy: StalePolicy) -> usize {
        let purged = match policy {
            StalePolicy::Purge if grid.shrinks_from(&self.grid) => self.pixels.retain_within(grid),
            _ => 0,
        };
        self.grid = grid;
        if self.view.hover.is_some_and(|k| !grid.contains(k)) {
            self.view.hover = None;
        }
        purged
    }

    /// Replace the pixel map wholesale and reset hover and dimensions.
    pub fn reset(&mut self, grid: GridConfig, pixels: PixelMap) {
        self.grid = grid;
        self.pixels = pixels;
        self.view.hover = None;
    }

    /// Empty the map, drop hover, and return to `default_grid`.
    pub fn clear(&mut self, default_grid: GridConfig) {
        self.reset(default_grid, PixelMap::new());
    }

    /// Painted cells inside the current grid.
    pub fn visible_pixels(&self) -> impl Iterator<Item = (CellKey, &Color)> {
        let grid = self.grid;
        self.pixels.iter().filter(move |(k, _)| grid.contains(*k))
    }
}
