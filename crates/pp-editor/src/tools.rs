//! The brush: translates input events into grid mutations.
//!
//! | Event              | Mutations                        |
//! |--------------------|----------------------------------|
//! | down               | paint cell, hover cell           |
//! | move (pressed)     | paint cell, hover cell           |
//! | move (released)    | hover cell                       |
//! | up                 | —                                |
//! | leave              | clear hover                      |

use crate::input::InputEvent;
use pp_core::palette;
use pp_core::{CellKey, Color};

/// A change to apply to the grid model.
#[derive(Debug, Clone, PartialEq)]
pub enum GridMutation {
    Paint { key: CellKey, color: Color },
    Hover(Option<CellKey>),
}

pub struct BrushTool {
    palette_index: usize,
    color: Color,
}

impl Default for BrushTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BrushTool {
    /// Brush loaded with the first palette color.
    pub fn new() -> Self {
        let entry = &palette::PALETTE[0];
        Self {
            palette_index: 0,
            color: entry.to_color(),
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    /// Load palette color `index`. Returns `false` for an unknown index,
    /// leaving the current color in place.
    pub fn select(&mut self, index: usize) -> bool {
        match palette::color_at(index) {
            Some(color) => {
                log::debug!("selected color {} ({})", color.name, color.hex);
                self.palette_index = index;
                self.color = color;
                true
            }
            None => false,
        }
    }

    /// Handle an input event; `cell` is the grid cell under the pointer.
    pub fn handle(&self, event: &InputEvent, cell: Option<CellKey>) -> Vec<GridMutation> {
        match event {
            InputEvent::PointerDown { .. } | InputEvent::PointerMove { pressed: true, .. } => {
                self.paint_and_hover(cell)
            }
            InputEvent::PointerMove { pressed: false, .. } => vec![GridMutation::Hover(cell)],
            InputEvent::PointerUp { .. } => Vec::new(),
            InputEvent::PointerLeave => vec![GridMutation::Hover(None)],
        }
    }

    fn paint_and_hover(&self, cell: Option<CellKey>) -> Vec<GridMutation> {
        let mut mutations = Vec::with_capacity(2);
        if let Some(key) = cell {
            mutations.push(GridMutation::Paint {
                key,
                color: self.color.clone(),
            });
        }
        mutations.push(GridMutation::Hover(cell));
        mutations
    }
}
