//! PNG export of the current frame.

use crate::frame::Frame;
use crate::raster::rasterize;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use pp_core::{PlannerError, Result};

/// Prefix of every exported file name.
pub const EXPORT_FILE_PREFIX: &str = "PlacePlannerDrawing";

/// Rasterize `frame` and encode it as PNG bytes.
pub fn export_frame(frame: &Frame) -> Result<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(PlannerError::Export("surface has no area".to_string()));
    }
    encode_png(&rasterize(frame))
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    log::debug!(
        "encoded {}x{} PNG ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Download name for an export taken at `timestamp` (ISO-8601).
pub fn export_file_name(timestamp: &str) -> String {
    format!("{EXPORT_FILE_PREFIX}@{timestamp}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameTheme, build_frame};
    use pp_core::{CellKey, Color, GridConfig, GridModel, PixelMap};

    #[test]
    fn exported_png_decodes_to_frame() {
        let mut model = GridModel::new(GridConfig::clamped(4, 2, 250), PixelMap::new());
        model.set_pixel_size(5);
        model.paint(Some(CellKey::new(3, 1)), &Color::new("black", "#000000"));

        let bytes = export_frame(&build_frame(&model, &FrameTheme::default())).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (20, 10));
        assert_eq!(*decoded.get_pixel(17, 7), image::Rgba([0, 0, 0, 255]));
        assert_eq!(*decoded.get_pixel(0, 0), image::Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn empty_frame_is_an_export_error() {
        let frame = Frame {
            width: 0,
            height: 0,
            commands: Vec::new(),
        };
        assert!(matches!(export_frame(&frame), Err(PlannerError::Export(_))));
    }

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(
            export_file_name("2022-04-02T18:04:05.123Z"),
            "PlacePlannerDrawing@2022-04-02T18:04:05.123Z.png"
        );
    }
}
