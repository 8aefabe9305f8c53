//! The fixed r/place color set.
//!
//! Entries without a version belong to the launch 16-color set; version 2
//! marks the colors added when the platform expanded to 32.

use crate::model::Color;

/// A compile-time palette record. Converted into an owned [`Color`] when a
/// user selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub hex: &'static str,
    pub version: Option<u32>,
}

impl PaletteEntry {
    const fn new(name: &'static str, hex: &'static str, version: Option<u32>) -> Self {
        Self { name, hex, version }
    }

    pub fn to_color(&self) -> Color {
        Color {
            name: self.name.to_string(),
            hex: self.hex.to_string(),
            version: self.version,
        }
    }

    /// Palette revision that introduced this color (unversioned means 1).
    pub fn revision(&self) -> u32 {
        self.version.unwrap_or(1)
    }
}

pub static PALETTE: [PaletteEntry; 32] = [
    PaletteEntry::new("burgundy", "#6D001A", Some(2)),
    PaletteEntry::new("dark red", "#BE0039", Some(2)),
    PaletteEntry::new("red", "#F54505", None),
    PaletteEntry::new("orange", "#F8A805", None),
    PaletteEntry::new("yellow", "#FBD635", None),
    PaletteEntry::new("pale yellow", "#FFF8B8", Some(2)),
    PaletteEntry::new("dark green", "#32A267", None),
    PaletteEntry::new("green", "#00CC78", Some(2)),
    PaletteEntry::new("light green", "#7EED57", None),
    PaletteEntry::new("dark teal", "#00756F", Some(2)),
    PaletteEntry::new("teal", "#009EAA", Some(2)),
    PaletteEntry::new("light teal", "#00CCC0", Some(2)),
    PaletteEntry::new("dark blue", "#2450A4", None),
    PaletteEntry::new("blue", "#3690E9", None),
    PaletteEntry::new("light blue", "#51E9F4", None),
    PaletteEntry::new("indigo", "#493AC1", Some(2)),
    PaletteEntry::new("periwinkle", "#6A5CFF", Some(2)),
    PaletteEntry::new("lavender", "#94B3FF", Some(2)),
    PaletteEntry::new("dark purple", "#811D9F", None),
    PaletteEntry::new("purple", "#B44AC0", None),
    PaletteEntry::new("pale purple", "#E4ABFF", Some(2)),
    PaletteEntry::new("magenta", "#DE107F", Some(2)),
    PaletteEntry::new("pink", "#FF3881", Some(2)),
    PaletteEntry::new("light pink", "#F899AA", None),
    PaletteEntry::new("dark brown", "#6D482F", Some(2)),
    PaletteEntry::new("brown", "#9C6926", None),
    PaletteEntry::new("beige", "#FFB470", Some(2)),
    PaletteEntry::new("black", "#000000", None),
    PaletteEntry::new("dark gray", "#515252", Some(2)),
    PaletteEntry::new("gray", "#898D90", None),
    PaletteEntry::new("light gray", "#D4D7D9", None),
    PaletteEntry::new("white", "#FFFFFF", None),
];

/// Palette color at `index`, in display order.
pub fn color_at(index: usize) -> Option<Color> {
    PALETTE.get(index).map(PaletteEntry::to_color)
}
