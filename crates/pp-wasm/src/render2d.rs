//! Canvas2D backend.
//!
//! Replays a [`Frame`] onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Called once per animation frame.

use pp_render::{DrawCmd, Frame};
use web_sys::CanvasRenderingContext2d;

pub fn render_frame(ctx: &CanvasRenderingContext2d, frame: &Frame) {
    ctx.save();
    ctx.set_line_width(1.0);
    for cmd in &frame.commands {
        match cmd {
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawCmd::Line { from, to, color } => {
                let (dx, dy) = pixel_center_offset(from.x, from.y, to.x, to.y);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.begin_path();
                ctx.move_to(from.x + dx, from.y + dy);
                ctx.line_to(to.x + dx, to.y + dy);
                ctx.stroke();
            }
        }
    }
    ctx.restore();
}

/// Half-pixel nudge that makes a 1px stroke cover exactly the row (or
/// column) starting at its coordinate instead of straddling two.
fn pixel_center_offset(x0: f64, y0: f64, x1: f64, y1: f64) -> (f64, f64) {
    if y0 == y1 {
        (0.0, 0.5)
    } else if x0 == x1 {
        (0.5, 0.0)
    } else {
        (0.0, 0.0)
    }
}
