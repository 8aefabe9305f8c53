//! WASM bridge for Place Planner: exposes the planner session to the page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the
//! `<canvas>`, the `requestAnimationFrame` loop, DOM events, and timers;
//! everything else happens here.

mod logging;
mod render2d;
mod storage;

use pp_core::{PALETTE, PlannerConfig, Viewport};
use pp_editor::{ClearTicket, InputEvent, NoticeToken, PlannerSession};
use pp_render::export_file_name;
use storage::LocalStorage;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The page-facing canvas controller. One per drawing surface.
#[wasm_bindgen]
pub struct PlannerCanvas {
    session: PlannerSession<LocalStorage>,
}

#[wasm_bindgen]
impl PlannerCanvas {
    /// Create a controller for a window of the given inner size.
    /// `config_json` optionally overrides [`PlannerConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f64, viewport_height: f64, config_json: Option<String>) -> Self {
        logging::init(log::LevelFilter::Debug);

        let config = match config_json.as_deref().map(PlannerConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("ignoring planner config: {e}");
                PlannerConfig::default()
            }
            None => PlannerConfig::default(),
        };
        let viewport = Viewport::new(viewport_width, viewport_height);
        Self {
            session: PlannerSession::new(LocalStorage::open(), config, viewport),
        }
    }

    /// Size the surface. Returns `false` after teardown.
    pub fn setup(&mut self) -> bool {
        self.session.setup().is_some()
    }

    /// Apply the current surface size to a canvas element.
    pub fn fit_canvas(&self, canvas: &HtmlCanvasElement) {
        let (w, h) = self.session.model().canvas_size();
        if canvas.width() != w {
            canvas.set_width(w);
        }
        if canvas.height() != h {
            canvas.set_height(h);
        }
    }

    pub fn canvas_width(&self) -> u32 {
        self.session.model().canvas_size().0
    }

    pub fn canvas_height(&self) -> u32 {
        self.session.model().canvas_size().1
    }

    /// Draw one frame. Does nothing while the surface is not ready.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        if let Some(frame) = self.session.frame() {
            render2d::render_frame(ctx, &frame);
        }
    }

    /// Window resized. Returns `true` when the canvas must be refit.
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> bool {
        self.session.resize(Viewport::new(viewport_width, viewport_height))
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.session.handle_event(&InputEvent::from_pointer_down(x, y))
    }

    /// `pressed` is `event.buttons !== 0`.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64, pressed: bool) -> bool {
        self.session.handle_event(&InputEvent::from_pointer_move(x, y, pressed))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.session.handle_event(&InputEvent::from_pointer_up(x, y))
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.session.handle_event(&InputEvent::PointerLeave)
    }

    // ─── Controls ────────────────────────────────────────────────────────

    pub fn select_color(&mut self, index: usize) -> bool {
        self.session.select_color(index)
    }

    pub fn selected_color(&self) -> usize {
        self.session.brush().palette_index()
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.session.set_show_grid(show);
    }

    pub fn show_grid(&self) -> bool {
        self.session.model().view().show_grid
    }

    /// Apply the grid-size inputs. Returns `false` (and posts a notice)
    /// when either value is not a valid dimension.
    pub fn set_dimensions(&mut self, width: &str, height: &str) -> bool {
        self.session.set_dimensions(width, height).is_ok()
    }

    pub fn grid_width(&self) -> u32 {
        self.session.model().grid().width()
    }

    pub fn grid_height(&self) -> u32 {
        self.session.model().grid().height()
    }

    /// Begin a clear. The page shows its confirmation UI and answers with
    /// `confirm_clear` or `cancel_clear` using the returned ticket.
    pub fn request_clear(&mut self) -> Option<u32> {
        self.session.request_clear().map(|t| t.raw() as u32)
    }

    pub fn confirm_clear(&mut self, ticket: u32) -> bool {
        self.session.confirm_clear(ClearTicket::from_raw(u64::from(ticket)))
    }

    pub fn cancel_clear(&mut self, ticket: u32) -> bool {
        self.session.cancel_clear(ClearTicket::from_raw(u64::from(ticket)))
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// PNG bytes of the current frame, or `undefined` on failure (a
    /// notice is posted instead).
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        self.session.export_png()
    }

    /// `PlacePlannerDrawing@<now>.png`.
    pub fn export_file_name(&self) -> String {
        let now: String = js_sys::Date::new_0().to_iso_string().into();
        export_file_name(&now)
    }

    // ─── Notices ─────────────────────────────────────────────────────────

    pub fn notice_message(&self) -> Option<String> {
        self.session.notices().current().map(|n| n.message.clone())
    }

    /// Token to pass to `dismiss_notice` after `notice_duration_ms`.
    pub fn notice_token(&self) -> Option<u32> {
        self.session.notices().current().map(|n| n.token.raw() as u32)
    }

    pub fn notice_duration_ms(&self) -> u32 {
        self.session.config().notice_duration_ms
    }

    pub fn dismiss_notice(&mut self, token: u32) -> bool {
        self.session.dismiss_notice(NoticeToken::from_raw(u64::from(token)))
    }

    /// The page is navigating away or unmounting the canvas.
    pub fn teardown(&mut self) {
        self.session.teardown();
    }
}

// ─── Standalone functions ────────────────────────────────────────────────

/// The palette as a JSON array of `{name, hex, version?}`, in display order.
#[wasm_bindgen]
pub fn palette_json() -> String {
    let colors: Vec<_> = PALETTE.iter().map(|e| e.to_color()).collect();
    serde_json::to_string(&colors).unwrap_or_else(|_| "[]".to_string())
}
