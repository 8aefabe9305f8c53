//! Grid model → per-frame draw commands.
//!
//! Layer order: background, painted cells, hover nubs, grid lines.

use kurbo::{Affine, Point, Rect};
use pp_core::{CellKey, GridModel, PlannerConfig, Result, Rgba};
use std::f64::consts::{FRAC_PI_2, PI};

/// One drawing primitive in surface coordinates (device pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Axis-aligned filled rectangle, no border.
    FillRect { rect: Rect, color: Rgba },
    /// Axis-aligned one-pixel line. Covers the pixel row (or column)
    /// starting at the line's coordinate.
    Line { from: Point, to: Point, color: Rgba },
}

/// A complete frame, ready for any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCmd>,
}

/// Colors used to draw the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTheme {
    pub background: Rgba,
    /// Outer arm of a hover nub.
    pub nub_light: Rgba,
    /// Inner arm of a hover nub.
    pub nub_dark: Rgba,
    pub grid_light: Rgba,
    pub grid_dark: Rgba,
}

impl Default for FrameTheme {
    fn default() -> Self {
        Self::with_background(Rgba::WHITE)
    }
}

impl FrameTheme {
    pub fn with_background(background: Rgba) -> Self {
        Self {
            background,
            nub_light: Rgba::WHITE.with_alpha(143),
            nub_dark: Rgba::BLACK.with_alpha(143),
            grid_light: Rgba::WHITE.with_alpha(60),
            grid_dark: Rgba::BLACK.with_alpha(60),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(Self::with_background(config.background_rgba()?))
    }
}

/// Build the display list for the current model state.
pub fn build_frame(model: &GridModel, theme: &FrameTheme) -> Frame {
    let (width, height) = model.canvas_size();
    let mut commands = Vec::with_capacity(1 + model.pixels().len());

    // Background
    commands.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
        color: theme.background,
    });

    push_cells(&mut commands, model);

    if let Some(key) = model.hover() {
        push_hover(&mut commands, model, key, theme);
    }

    if model.view().show_grid {
        push_grid(&mut commands, model, theme);
    }

    Frame {
        width,
        height,
        commands,
    }
}

fn cell_rect(model: &GridModel, key: CellKey) -> Rect {
    let size = f64::from(model.pixel_size());
    let (x, y) = model.cell_to_screen(key);
    Rect::new(x, y, x + size, y + size)
}

fn push_cells(out: &mut Vec<DrawCmd>, model: &GridModel) {
    for (key, color) in model.visible_pixels() {
        match color.rgba() {
            Ok(rgba) => out.push(DrawCmd::FillRect {
                rect: cell_rect(model, key),
                color: rgba,
            }),
            Err(e) => log::trace!("cell {key} not drawn: {e}"),
        }
    }
}

/// Corner brackets around the hover cell, one per corner, each rotated a
/// further quarter turn clockwise.
fn push_hover(out: &mut Vec<DrawCmd>, model: &GridModel, key: CellKey, theme: &FrameTheme) {
    let cell = cell_rect(model, key);
    let corners = [
        (Point::new(cell.x0, cell.y0), 0.0),
        (Point::new(cell.x1, cell.y0), FRAC_PI_2),
        (Point::new(cell.x1, cell.y1), PI),
        (Point::new(cell.x0, cell.y1), FRAC_PI_2 * 3.0),
    ];
    for (corner, rotation) in corners {
        out.extend(nub(corner, rotation, model.pixel_size(), theme));
    }
}

/// One L-shaped nub at `corner`. Drawn in the corner's local frame (arms
/// along +x and +y), then rotated into place.
fn nub(corner: Point, rotation: f64, pixel_size: u32, theme: &FrameTheme) -> Vec<DrawCmd> {
    let len = (f64::from(pixel_size) * 0.25).floor();
    let w = (f64::from(pixel_size) * 0.1).floor();
    let transform = Affine::translate(corner.to_vec2()) * Affine::rotate(rotation);

    let local = [
        (Rect::new(-w, -w, len, 0.0), theme.nub_light),
        (Rect::new(-w, 0.0, 0.0, len), theme.nub_light),
        (Rect::new(0.0, 0.0, len, w), theme.nub_dark),
        (Rect::new(0.0, w, w, len), theme.nub_dark),
    ];
    local
        .into_iter()
        .filter(|(rect, _)| rect.area() > 0.0)
        .map(|(rect, color)| DrawCmd::FillRect {
            rect: transform.transform_rect_bbox(rect).round(),
            color,
        })
        .collect()
}

/// Row and column boundaries, each stroked light then dark so the grid
/// reads on both pale and saturated cells. The closing boundary sits on the
/// last device row/column, since `h`/`w` is one past the surface.
fn push_grid(out: &mut Vec<DrawCmd>, model: &GridModel, theme: &FrameTheme) {
    let size = f64::from(model.pixel_size());
    let (w, h) = model.canvas_size();
    let (w, h) = (f64::from(w), f64::from(h));
    let grid = model.grid();

    for r in 0..=grid.height() {
        let y = (f64::from(r) * size).min(h - 1.0);
        for color in [theme.grid_light, theme.grid_dark] {
            out.push(DrawCmd::Line {
                from: Point::new(0.0, y),
                to: Point::new(w, y),
                color,
            });
        }
    }
    for c in 0..=grid.width() {
        let x = (f64::from(c) * size).min(w - 1.0);
        for color in [theme.grid_light, theme.grid_dark] {
            out.push(DrawCmd::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, h),
                color,
            });
        }
    }
}
