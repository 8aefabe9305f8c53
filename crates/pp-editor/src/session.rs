//! The planner session: single owner of all drawing-surface state.
//!
//! Both the input path (`handle_event`) and the render path (`frame`) go
//! through one `PlannerSession`, so there is exactly one writer and one
//! reader, both on the host's event thread.
//!
//! ## Surface lifecycle
//!
//! ```text
//! Uninitialized --setup--> Ready --input/resize/frame--> Ready
//!       ^                    |
//!       +---- reinitialize --+   (dimension change, confirmed clear)
//! ```
//!
//! Every re-initialization bumps the surface epoch. `teardown` leaves the
//! session permanently `Uninitialized`.

use crate::input::InputEvent;
use crate::notice::{NoticeBoard, NoticeToken};
use crate::tools::{BrushTool, GridMutation};
use pp_core::store::{load_dimensions, load_pixels, save_dimensions, save_pixels};
use pp_core::{GridConfig, GridModel, KeyValueStore, PixelMap, PlannerConfig, Result, Viewport};
use pp_render::{Frame, FrameTheme, build_frame, export_frame};

/// Shown when an export cannot be produced.
pub const EXPORT_FAILED_MESSAGE: &str = "Could not download image, try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    Ready,
}

/// Handle for a pending clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearTicket(u64);

impl ClearTicket {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingClear {
    ticket: ClearTicket,
    /// Surface epoch at request time.
    epoch: u64,
}

pub struct PlannerSession<S: KeyValueStore> {
    config: PlannerConfig,
    store: S,
    model: GridModel,
    brush: BrushTool,
    theme: FrameTheme,
    viewport: Viewport,
    state: SurfaceState,
    epoch: u64,
    torn_down: bool,
    pending_clear: Option<PendingClear>,
    next_ticket: u64,
    notices: NoticeBoard,
    /// False while the store is rejecting writes.
    persisting: bool,
}

impl<S: KeyValueStore> PlannerSession<S> {
    /// Load persisted state from `store`. The surface starts
    /// `Uninitialized`; call [`setup`](Self::setup) once the host has a
    /// drawing surface.
    pub fn new(store: S, config: PlannerConfig, viewport: Viewport) -> Self {
        let pixels = load_pixels(&store).unwrap_or_else(|e| {
            log::warn!("starting with an empty drawing: {e}");
            PixelMap::new()
        });
        let grid = match load_dimensions(&store, config.max_dimension) {
            Ok(Some(grid)) => grid,
            Ok(None) => config.default_grid(viewport.width),
            Err(e) => {
                log::warn!("using default grid size: {e}");
                config.default_grid(viewport.width)
            }
        };
        let theme = FrameTheme::from_config(&config).unwrap_or_else(|e| {
            log::warn!("using default background: {e}");
            FrameTheme::default()
        });
        log::debug!(
            "session loaded: {}x{} grid, {} painted cells",
            grid.width(),
            grid.height(),
            pixels.len()
        );

        Self {
            notices: NoticeBoard::new(config.notice_duration_ms),
            config,
            store,
            model: GridModel::new(grid, pixels),
            brush: BrushTool::new(),
            theme,
            viewport,
            state: SurfaceState::Uninitialized,
            epoch: 0,
            torn_down: false,
            pending_clear: None,
            next_ticket: 1,
            persisting: true,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn brush(&self) -> &BrushTool {
        &self.brush
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the last store write succeeded.
    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    pub fn clear_pending(&self) -> bool {
        self.pending_clear.is_some()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// `Uninitialized → Ready`: size the surface for the current viewport.
    /// Returns the canvas size, or `None` after teardown.
    pub fn setup(&mut self) -> Option<(u32, u32)> {
        if self.torn_down {
            return None;
        }
        self.model.rescale(self.viewport, &self.config);
        self.state = SurfaceState::Ready;
        let size = self.model.canvas_size();
        log::debug!("surface ready at {}x{} (epoch {})", size.0, size.1, self.epoch);
        Some(size)
    }

    /// Tear down and recreate the surface at the current dimensions.
    fn reinitialize(&mut self) {
        self.state = SurfaceState::Uninitialized;
        self.epoch += 1;
        self.setup();
    }

    /// Navigation away: the session stops accepting input, producing
    /// frames, and honoring timers.
    pub fn teardown(&mut self) {
        log::debug!("surface torn down");
        self.torn_down = true;
        self.state = SurfaceState::Uninitialized;
        self.pending_clear = None;
        self.model.set_paused(false);
        self.notices.teardown();
    }

    /// Viewport changed. Returns `true` when the canvas must be resized.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        if self.state != SurfaceState::Ready {
            return false;
        }
        let changed = self.model.rescale(viewport, &self.config);
        if changed {
            let (w, h) = self.model.canvas_size();
            log::debug!("resize: pixel size {} -> canvas {w}x{h}", self.model.pixel_size());
        }
        changed
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route a pointer event through the brush. Returns `true` when the
    /// next frame will differ.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if self.state != SurfaceState::Ready {
            return false;
        }
        let cell = event
            .position()
            .and_then(|(x, y)| self.model.screen_to_cell(x, y));
        let mutations = self.brush.handle(event, cell);
        self.apply_mutations(mutations)
    }

    fn apply_mutations(&mut self, mutations: Vec<GridMutation>) -> bool {
        let mut changed = false;
        let mut painted = false;
        for mutation in mutations {
            match mutation {
                GridMutation::Paint { key, color } => {
                    if self.model.paint(Some(key), &color) {
                        log::trace!("placed {} ({}) at {key}", color.name, color.hex);
                        painted = true;
                    }
                }
                GridMutation::Hover(key) => {
                    changed |= self.model.set_hover(key);
                }
            }
        }
        if painted {
            self.persist_pixels();
        }
        changed || painted
    }

    pub fn select_color(&mut self, index: usize) -> bool {
        self.brush.select(index)
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.model.set_show_grid(show);
    }

    /// Apply user-typed grid dimensions. Invalid input leaves the grid
    /// unchanged and posts a notice. After teardown nothing changes and the
    /// current grid is returned.
    pub fn set_dimensions(&mut self, width: &str, height: &str) -> Result<GridConfig> {
        if self.torn_down {
            log::debug!("grid size {width:?} x {height:?} ignored after teardown");
            return Ok(self.model.grid());
        }
        let grid = match GridConfig::parse(width, height, self.config.max_dimension) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("rejected grid size {width:?} x {height:?}: {e}");
                self.notices.post(format!(
                    "Grid size must be a whole number from 1 to {}.",
                    self.config.max_dimension
                ));
                return Err(e);
            }
        };
        if grid == self.model.grid() {
            return Ok(grid);
        }

        let purged = self.model.set_dimensions(grid, self.config.stale_cells);
        if purged > 0 {
            log::debug!("purged {purged} cells outside {}x{}", grid.width(), grid.height());
            self.persist_pixels();
        }
        self.persist_dimensions();
        if self.state == SurfaceState::Ready {
            self.reinitialize();
        }
        Ok(grid)
    }

    // ─── Clear (request → confirm | cancel) ──────────────────────────────

    /// Start a clear. Painting is paused until the request is confirmed or
    /// cancelled. A new request replaces an older one.
    pub fn request_clear(&mut self) -> Option<ClearTicket> {
        if self.torn_down {
            return None;
        }
        let ticket = ClearTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_clear = Some(PendingClear {
            ticket,
            epoch: self.epoch,
        });
        self.model.set_paused(true);
        Some(ticket)
    }

    /// Commit a pending clear. Does nothing for an unknown ticket, or when
    /// the surface was reset or torn down since the request.
    pub fn confirm_clear(&mut self, ticket: ClearTicket) -> bool {
        let Some(pending) = self.pending_clear else {
            return false;
        };
        if pending.ticket != ticket {
            return false;
        }
        self.pending_clear = None;
        self.model.set_paused(false);
        if self.torn_down || pending.epoch != self.epoch {
            log::debug!("clear skipped: surface changed since request");
            return false;
        }

        let grid = self.config.default_grid(self.viewport.width);
        self.model.clear(grid);
        self.persist_pixels();
        self.persist_dimensions();
        self.reinitialize();
        log::debug!("cleared to {}x{}", grid.width(), grid.height());
        true
    }

    /// Abandon a pending clear; nothing but the pause flag changes.
    pub fn cancel_clear(&mut self, ticket: ClearTicket) -> bool {
        match self.pending_clear {
            Some(pending) if pending.ticket == ticket => {
                self.pending_clear = None;
                self.model.set_paused(false);
                true
            }
            _ => false,
        }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Display list for the next animation frame; `None` unless `Ready`.
    pub fn frame(&self) -> Option<Frame> {
        (self.state == SurfaceState::Ready).then(|| build_frame(&self.model, &self.theme))
    }

    /// Current frame as PNG bytes. On failure a notice is posted and
    /// `None` returned; the drawing is never touched.
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        let result = match self.frame() {
            Some(frame) => export_frame(&frame),
            None => Err(pp_core::PlannerError::Export("surface not ready".to_string())),
        };
        match result {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("{e}");
                self.notices.post(EXPORT_FAILED_MESSAGE);
                None
            }
        }
    }

    pub fn dismiss_notice(&mut self, token: NoticeToken) -> bool {
        self.notices.dismiss(token)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    fn persist_pixels(&mut self) {
        let result = save_pixels(&mut self.store, self.model.pixels());
        self.note_store_result(result);
    }

    fn persist_dimensions(&mut self) {
        let result = save_dimensions(&mut self.store, self.model.grid());
        self.note_store_result(result);
    }

    /// Store failures degrade to an in-memory session. Logged once per
    /// failure streak.
    fn note_store_result(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                if !self.persisting {
                    log::info!("storage writable again");
                }
                self.persisting = true;
            }
            Err(e) => {
                if self.persisting {
                    log::warn!("continuing without saving: {e}");
                }
                self.persisting = false;
            }
        }
    }
}
