//! Rendering for the planner surface.
//!
//! [`frame::build_frame`] turns the grid model into a backend-neutral
//! display list once per animation frame. The Canvas2D backend lives in
//! `pp-wasm`; [`raster`] is the software backend used for PNG export.

pub mod export;
pub mod frame;
pub mod raster;

pub use export::{export_file_name, export_frame};
pub use frame::{DrawCmd, Frame, FrameTheme, build_frame};
pub use raster::rasterize;
