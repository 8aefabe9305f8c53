//! Software rasterizer: display list → RGBA image.
//!
//! Pixels are covered when their center lies inside a rectangle; colors
//! are composited source-over with straight alpha, matching what Canvas2D
//! produces for the axis-aligned, integer-aligned shapes the frame emits.

use crate::frame::{DrawCmd, Frame};
use image::RgbaImage;
use kurbo::Rect;
use pp_core::Rgba;

pub fn rasterize(frame: &Frame) -> RgbaImage {
    let mut img = RgbaImage::new(frame.width, frame.height);
    for cmd in &frame.commands {
        match *cmd {
            DrawCmd::FillRect { rect, color } => fill_rect(&mut img, rect, color),
            DrawCmd::Line { from, to, color } => {
                let rect = Rect::from_points(from, to);
                let rect = if rect.height() == 0.0 {
                    Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + 1.0)
                } else if rect.width() == 0.0 {
                    Rect::new(rect.x0, rect.y0, rect.x0 + 1.0, rect.y1)
                } else {
                    log::trace!("diagonal line skipped: {from:?} -> {to:?}");
                    continue;
                };
                fill_rect(&mut img, rect, color);
            }
        }
    }
    img
}

fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Rgba) {
    if color.a == 0 {
        return;
    }
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));
    let rect = rect.abs();
    let x0 = rect.x0.round().clamp(0.0, w) as u32;
    let x1 = rect.x1.round().clamp(0.0, w) as u32;
    let y0 = rect.y0.round().clamp(0.0, h) as u32;
    let y1 = rect.y1.round().clamp(0.0, h) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            blend(img.get_pixel_mut(x, y), color);
        }
    }
}

/// Source-over compositing of `src` onto `dst`.
fn blend(dst: &mut image::Rgba<u8>, src: Rgba) {
    if src.a == 255 {
        *dst = image::Rgba([src.r, src.g, src.b, 255]);
        return;
    }
    let sa = f32::from(src.a) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = image::Rgba([0, 0, 0, 0]);
        return;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = image::Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}
