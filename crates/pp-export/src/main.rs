//! `pp-export`: render a saved Place Planner drawing to a PNG file.
//!
//! Takes the same two records the web build keeps in `localStorage`
//! (`pixels` and, optionally, `pixelDimensions`), copied out into files.
//!
//! ```text
//! pp-export --pixels pixels.json [--dims dims.json] [--pixel-size 10]
//!           [--grid] [--background "#FFFFFF"] [--out drawing.png]
//! ```

use pp_core::store::{load_dimensions, load_pixels};
use pp_core::{
    DIMENSIONS_KEY, GridConfig, GridModel, MemoryStore, PIXELS_KEY, PixelMap, PlannerConfig,
    PlannerError,
};
use pp_render::export::EXPORT_FILE_PREFIX;
use pp_render::{FrameTheme, build_frame, export_frame};
use std::path::PathBuf;

const USAGE: &str = "usage: pp-export --pixels FILE [--dims FILE] [--pixel-size N] [--grid] \
                     [--background HEX] [--out FILE]";

/// Largest accepted `--pixel-size`.
const MAX_EXPORT_PIXEL_SIZE: u32 = 100;

#[derive(Debug, PartialEq)]
struct Options {
    pixels: PathBuf,
    dims: Option<PathBuf>,
    pixel_size: u32,
    grid: bool,
    background: Option<String>,
    out: PathBuf,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut pixels = None;
    let mut dims = None;
    let mut pixel_size = 10;
    let mut grid = false;
    let mut background = None;
    let mut out = PathBuf::from(format!("{EXPORT_FILE_PREFIX}.png"));

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match arg.as_str() {
            "--pixels" => pixels = Some(PathBuf::from(value("--pixels")?)),
            "--dims" => dims = Some(PathBuf::from(value("--dims")?)),
            "--pixel-size" => {
                let raw = value("--pixel-size")?;
                pixel_size = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|n| (1..=MAX_EXPORT_PIXEL_SIZE).contains(n))
                    .ok_or_else(|| {
                        format!("--pixel-size must be 1..={MAX_EXPORT_PIXEL_SIZE}, got {raw:?}")
                    })?;
            }
            "--grid" => grid = true,
            "--background" => background = Some(value("--background")?),
            "--out" => out = PathBuf::from(value("--out")?),
            other => return Err(format!("unknown argument {other:?}")),
        }
    }

    Ok(Options {
        pixels: pixels.ok_or("--pixels is required")?,
        dims,
        pixel_size,
        grid,
        background,
        out,
    })
}

/// Smallest grid at least as large as the default that holds every cell.
fn covering_grid(pixels: &PixelMap, config: &PlannerConfig) -> GridConfig {
    let (w, h) = pixels.iter().fold((config.large_grid, config.large_grid), |(w, h), (k, _)| {
        (w.max(k.x.saturating_add(1)), h.max(k.y.saturating_add(1)))
    });
    GridConfig::clamped(w, h, config.max_dimension)
}

fn render(store: &MemoryStore, options: &Options) -> Result<Vec<u8>, PlannerError> {
    let mut config = PlannerConfig::default();
    if let Some(bg) = &options.background {
        config.background = bg.clone();
    }
    let theme = FrameTheme::from_config(&config)?;

    let pixels = load_pixels(store)?;
    let grid = match load_dimensions(store, config.max_dimension)? {
        Some(grid) => grid,
        None => covering_grid(&pixels, &config),
    };
    log::info!(
        "rendering {} cells on a {}x{} grid at {}px",
        pixels.len(),
        grid.width(),
        grid.height(),
        options.pixel_size
    );

    let mut model = GridModel::new(grid, pixels);
    model.set_pixel_size(options.pixel_size);
    model.set_show_grid(options.grid);
    export_frame(&build_frame(&model, &theme))
}

fn run(options: &Options) -> Result<(), String> {
    let read = |path: &PathBuf| {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
    };

    let mut store = MemoryStore::new().with_entry(PIXELS_KEY, &read(&options.pixels)?);
    if let Some(dims) = &options.dims {
        store = store.with_entry(DIMENSIONS_KEY, &read(dims)?);
    }

    let png = render(&store, options).map_err(|e| e.to_string())?;
    std::fs::write(&options.out, &png)
        .map_err(|e| format!("cannot write {}: {e}", options.out.display()))?;
    log::info!("wrote {} ({} bytes)", options.out.display(), png.len());
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("pp-export error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(&options) {
        eprintln!("pp-export error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::CellKey;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn options(pixel_size: u32) -> Options {
        Options {
            pixels: PathBuf::from("pixels.json"),
            dims: None,
            pixel_size,
            grid: false,
            background: None,
            out: PathBuf::from("out.png"),
        }
    }

    #[test]
    fn parses_full_command_line() {
        let parsed = parse_args(&args(&[
            "--pixels", "p.json", "--dims", "d.json", "--pixel-size", "4", "--grid", "--out",
            "x.png",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            Options {
                pixels: PathBuf::from("p.json"),
                dims: Some(PathBuf::from("d.json")),
                pixel_size: 4,
                grid: true,
                background: None,
                out: PathBuf::from("x.png"),
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--pixels"])).is_err());
        assert!(parse_args(&args(&["--pixels", "p", "--pixel-size", "0"])).is_err());
        assert!(parse_args(&args(&["--pixels", "p", "--bogus"])).is_err());
    }

    #[test]
    fn grid_grows_to_cover_stored_cells() {
        let config = PlannerConfig::default();
        let pixels: PixelMap = [(CellKey::new(40, 3), pp_core::Color::new("black", "#000000"))]
            .into_iter()
            .collect();
        assert_eq!(covering_grid(&pixels, &config), GridConfig::clamped(41, 25, 250));
        assert_eq!(covering_grid(&PixelMap::new(), &config), GridConfig::clamped(25, 25, 250));
    }

    #[test]
    fn renders_with_stored_dimensions() {
        let store = MemoryStore::new()
            .with_entry(PIXELS_KEY, r##"{"1,0":{"name":"red","hex":"#F54505"}}"##)
            .with_entry(DIMENSIONS_KEY, r#"{"width":2,"height":1}"#);
        let png = render(&store, &options(3)).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn bad_background_fails_cleanly() {
        let store = MemoryStore::new().with_entry(PIXELS_KEY, "{}");
        let mut opts = options(3);
        opts.background = Some("nope".into());
        assert!(matches!(render(&store, &opts), Err(PlannerError::InvalidHex(_))));
    }
}
