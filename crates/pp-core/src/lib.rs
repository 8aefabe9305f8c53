pub mod config;
pub mod error;
pub mod grid;
pub mod key;
pub mod model;
pub mod palette;
pub mod pixels;
pub mod store;

pub use config::{PlannerConfig, StalePolicy};
pub use error::{PlannerError, Result};
pub use grid::{
    GridConfig, GridModel, MAX_PIXEL_SIZE, ViewState, Viewport, parse_dimension, recompute_scale,
};
pub use key::CellKey;
pub use model::{Color, Rgba};
pub use palette::{PALETTE, PaletteEntry};
pub use pixels::PixelMap;
pub use store::{
    DIMENSIONS_KEY, KeyValueStore, MemoryStore, PIXELS_KEY, load_dimensions, load_pixels,
    save_dimensions, save_pixels,
};
