//! Integration tests: input → session → store and frame.
//!
//! Drives a `PlannerSession` the way the web host does (setup, pointer
//! events, resize, clear protocol, export) and checks both the persisted
//! records and the produced frames.

use pp_core::store::load_pixels;
use pp_core::{
    CellKey, DIMENSIONS_KEY, GridConfig, MemoryStore, PIXELS_KEY, PlannerConfig, PlannerError,
    Viewport,
};
use pp_editor::session::EXPORT_FAILED_MESSAGE;
use pp_editor::{InputEvent, PlannerSession, SurfaceState};
use pp_render::DrawCmd;
use pretty_assertions::assert_eq;

const RED: usize = 2;

/// 3×3 grid on a viewport that yields pixel size 10.
fn session_3x3() -> PlannerSession<MemoryStore> {
    let store = MemoryStore::new().with_entry(DIMENSIONS_KEY, r#"{"width":3,"height":3}"#);
    let mut session =
        PlannerSession::new(store, PlannerConfig::default(), Viewport::new(50.0, 200.0));
    assert_eq!(session.setup(), Some((30, 30)));
    session
}

fn cell_fill(session: &PlannerSession<MemoryStore>, index: usize) -> DrawCmd {
    session.frame().expect("surface ready").commands[index]
}

// ─── Painting ────────────────────────────────────────────────────────────

#[test]
fn click_paints_persists_and_redraws() {
    let mut session = session_3x3();
    session.select_color(RED);

    assert!(session.handle_event(&InputEvent::from_pointer_down(22.0, 5.0)));

    let stored = load_pixels(session.store()).unwrap();
    assert_eq!(stored.get(CellKey::new(2, 0)).map(|c| c.hex.as_str()), Some("#F54505"));
    assert_eq!(
        session.store().get(PIXELS_KEY),
        Some(r##"{"2,0":{"name":"red","hex":"#F54505"}}"##)
    );
    assert_eq!(session.model().hover(), Some(CellKey::new(2, 0)));

    match cell_fill(&session, 1) {
        DrawCmd::FillRect { rect, color } => {
            assert_eq!((rect.x0, rect.y0, rect.width(), rect.height()), (20.0, 0.0, 10.0, 10.0));
            assert_eq!(color.to_hex(), "#F54505");
        }
        other => panic!("expected cell fill, got {other:?}"),
    }
}

#[test]
fn drag_paints_every_cell_crossed() {
    let mut session = session_3x3();
    session.handle_event(&InputEvent::from_pointer_down(1.0, 1.0));
    for x in [11.0, 21.0] {
        session.handle_event(&InputEvent::from_pointer_move(x, 1.0, true));
    }
    session.handle_event(&InputEvent::from_pointer_up(21.0, 1.0));
    session.handle_event(&InputEvent::from_pointer_move(1.0, 25.0, false));

    assert_eq!(session.model().pixels().len(), 3);
    assert_eq!(session.model().hover(), Some(CellKey::new(0, 2)));
}

#[test]
fn pointer_off_canvas_is_ignored() {
    let mut session = session_3x3();
    session.handle_event(&InputEvent::from_pointer_move(5.0, 5.0, false));
    session.handle_event(&InputEvent::from_pointer_down(35.0, 5.0));
    assert!(session.model().pixels().is_empty());
    assert_eq!(session.model().hover(), None);
    assert_eq!(session.store().get(PIXELS_KEY), None);
}

#[test]
fn input_before_setup_is_dropped() {
    let mut session =
        PlannerSession::new(MemoryStore::new(), PlannerConfig::default(), Viewport::default());
    assert_eq!(session.state(), SurfaceState::Uninitialized);
    assert!(!session.handle_event(&InputEvent::from_pointer_down(1.0, 1.0)));
    assert!(session.frame().is_none());
}

// ─── Resize ──────────────────────────────────────────────────────────────

#[test]
fn resize_redraws_cells_at_new_scale() {
    let mut session = session_3x3();
    session.select_color(RED);
    session.handle_event(&InputEvent::from_pointer_down(22.0, 5.0));

    assert!(session.resize(Viewport::new(38.0, 200.0)));
    assert_eq!(session.model().pixel_size(), 6);
    match cell_fill(&session, 1) {
        DrawCmd::FillRect { rect, .. } => {
            assert_eq!((rect.x0, rect.y0, rect.width(), rect.height()), (12.0, 0.0, 6.0, 6.0));
        }
        other => panic!("expected cell fill, got {other:?}"),
    }
    assert_eq!(session.frame().unwrap().width, 18);
}

// ─── Dimensions ──────────────────────────────────────────────────────────

#[test]
fn invalid_dimensions_keep_last_valid_and_notify() {
    let mut session = session_3x3();
    for (w, h) in [("0", "3"), ("three", "3"), ("3", "-2")] {
        let err = session.set_dimensions(w, h).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDimension { .. }));
    }
    assert_eq!(session.model().grid(), GridConfig::clamped(3, 3, 250));
    assert_eq!(session.state(), SurfaceState::Ready);
    assert!(session.notices().current().is_some());
    assert_eq!(session.epoch(), 0);
}

#[test]
fn dimension_change_recreates_surface_and_persists() {
    let mut session = session_3x3();
    let grid = session.set_dimensions("4", " 2 ").unwrap();
    assert_eq!((grid.width(), grid.height()), (4, 2));
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.state(), SurfaceState::Ready);
    assert_eq!(session.store().get(DIMENSIONS_KEY), Some(r#"{"width":4,"height":2}"#));
}

#[test]
fn purge_policy_drops_cells_on_shrink() {
    let store = MemoryStore::new().with_entry(DIMENSIONS_KEY, r#"{"width":3,"height":3}"#);
    let config = PlannerConfig::from_json(r#"{"stale_cells":"purge"}"#).unwrap();
    let mut session = PlannerSession::new(store, config, Viewport::new(50.0, 200.0));
    session.setup();
    session.handle_event(&InputEvent::from_pointer_down(25.0, 25.0));
    session.handle_event(&InputEvent::from_pointer_down(5.0, 5.0));

    session.set_dimensions("2", "2").unwrap();
    assert_eq!(session.model().pixels().len(), 1);
    assert_eq!(load_pixels(session.store()).unwrap().len(), 1);
}

#[test]
fn dimension_change_after_teardown_is_ignored() {
    let mut session = session_3x3();
    session.teardown();

    let grid = session.set_dimensions("7", "7").unwrap();
    assert_eq!(grid, GridConfig::clamped(3, 3, 250));
    assert_eq!(session.model().grid(), GridConfig::clamped(3, 3, 250));
    assert_eq!(session.store().get(DIMENSIONS_KEY), Some(r#"{"width":3,"height":3}"#));
    assert_eq!(session.state(), SurfaceState::Uninitialized);
    assert_eq!(session.epoch(), 0);
}

#[test]
fn purge_after_teardown_leaves_stored_pixels() {
    let store = MemoryStore::new().with_entry(DIMENSIONS_KEY, r#"{"width":3,"height":3}"#);
    let config = PlannerConfig::from_json(r#"{"stale_cells":"purge"}"#).unwrap();
    let mut session = PlannerSession::new(store, config, Viewport::new(50.0, 200.0));
    session.setup();
    session.handle_event(&InputEvent::from_pointer_down(25.0, 25.0));
    let before = session.store().get(PIXELS_KEY).map(str::to_string);

    session.teardown();
    session.set_dimensions("1", "1").unwrap();
    assert_eq!(session.model().pixels().len(), 1);
    assert_eq!(session.store().get(PIXELS_KEY).map(str::to_string), before);
}

#[test]
fn dimension_change_before_setup_waits_for_host() {
    let store = MemoryStore::new();
    let mut session =
        PlannerSession::new(store, PlannerConfig::default(), Viewport::new(50.0, 200.0));

    session.set_dimensions("3", "3").unwrap();
    assert_eq!(session.state(), SurfaceState::Uninitialized);
    assert!(session.frame().is_none());
    assert!(!session.handle_event(&InputEvent::from_pointer_down(5.0, 5.0)));
    assert_eq!(session.store().get(DIMENSIONS_KEY), Some(r#"{"width":3,"height":3}"#));

    assert_eq!(session.setup(), Some((30, 30)));
    assert_eq!(session.state(), SurfaceState::Ready);
}

// ─── Clear protocol ──────────────────────────────────────────────────────

#[test]
fn confirmed_clear_resets_to_default() {
    let mut session = session_3x3();
    session.handle_event(&InputEvent::from_pointer_down(5.0, 5.0));

    let ticket = session.request_clear().unwrap();
    assert!(session.model().view().paused);
    // Painting is suppressed while the confirmation is open.
    session.handle_event(&InputEvent::from_pointer_down(15.0, 5.0));
    assert_eq!(session.model().pixels().len(), 1);

    assert!(session.confirm_clear(ticket));
    assert!(session.model().pixels().is_empty());
    assert!(!session.model().view().paused);
    // Viewport is narrower than 600, so the small default applies.
    assert_eq!(session.model().grid(), GridConfig::clamped(15, 15, 250));
    assert_eq!(session.store().get(PIXELS_KEY), Some("{}"));
    assert_eq!(session.store().get(DIMENSIONS_KEY), Some(r#"{"width":15,"height":15}"#));
}

#[test]
fn cancelled_clear_changes_nothing() {
    let mut session = session_3x3();
    session.handle_event(&InputEvent::from_pointer_down(5.0, 5.0));
    let before = session.store().get(PIXELS_KEY).map(str::to_string);

    let ticket = session.request_clear().unwrap();
    assert!(session.cancel_clear(ticket));
    assert!(!session.confirm_clear(ticket), "cancelled ticket is spent");

    assert_eq!(session.model().pixels().len(), 1);
    assert_eq!(session.model().grid(), GridConfig::clamped(3, 3, 250));
    assert_eq!(session.store().get(PIXELS_KEY).map(str::to_string), before);
    assert!(!session.model().view().paused);
}

#[test]
fn clear_is_skipped_after_surface_reset_or_teardown() {
    let mut session = session_3x3();
    session.handle_event(&InputEvent::from_pointer_down(5.0, 5.0));

    let ticket = session.request_clear().unwrap();
    session.set_dimensions("5", "5").unwrap();
    assert!(!session.confirm_clear(ticket));
    assert_eq!(session.model().pixels().len(), 1);

    let ticket = session.request_clear().unwrap();
    session.teardown();
    assert!(!session.confirm_clear(ticket));
    assert_eq!(session.model().pixels().len(), 1);
    assert!(session.request_clear().is_none());
}

#[test]
fn newer_request_invalidates_older_ticket() {
    let mut session = session_3x3();
    let old = session.request_clear().unwrap();
    let new = session.request_clear().unwrap();
    assert!(!session.confirm_clear(old));
    assert!(session.clear_pending());
    assert!(session.confirm_clear(new));
}

// ─── Persistence failures ────────────────────────────────────────────────

#[test]
fn failing_store_degrades_to_memory() {
    let mut store = MemoryStore::new();
    store.set_read_only(true);
    let mut session =
        PlannerSession::new(store, PlannerConfig::default(), Viewport::new(1200.0, 900.0));
    session.setup();

    assert!(session.handle_event(&InputEvent::from_pointer_down(1.0, 1.0)));
    assert!(!session.is_persisting());
    assert_eq!(session.model().pixels().len(), 1);
    assert!(session.frame().is_some());
}

#[test]
fn corrupt_records_fall_back_to_defaults() {
    let store = MemoryStore::new()
        .with_entry(PIXELS_KEY, "{oops")
        .with_entry(DIMENSIONS_KEY, r#"{"width":-3,"height":9}"#);
    let session =
        PlannerSession::new(store, PlannerConfig::default(), Viewport::new(1200.0, 900.0));
    assert!(session.model().pixels().is_empty());
    assert_eq!(session.model().grid(), GridConfig::clamped(25, 25, 250));
}

// ─── Export and notices ──────────────────────────────────────────────────

#[test]
fn export_produces_png_of_current_frame() {
    let mut session = session_3x3();
    session.select_color(RED);
    session.handle_event(&InputEvent::from_pointer_down(22.0, 5.0));

    let bytes = session.export_png().expect("export succeeds");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (30, 30));
    assert_eq!(*img.get_pixel(25, 5), image::Rgba([0xF5, 0x45, 0x05, 255]));
}

#[test]
fn export_before_setup_posts_notice_and_keeps_drawing() {
    let store =
        MemoryStore::new().with_entry(PIXELS_KEY, r##"{"0,0":{"name":"red","hex":"#F54505"}}"##);
    let mut session = PlannerSession::new(store, PlannerConfig::default(), Viewport::default());

    assert!(session.export_png().is_none());
    let notice = session.notices().current().expect("notice posted").clone();
    assert_eq!(notice.message, EXPORT_FAILED_MESSAGE);
    assert_eq!(notice.duration_ms, 5000);
    assert_eq!(session.model().pixels().len(), 1);

    assert!(session.dismiss_notice(notice.token));
    assert!(session.notices().current().is_none());
}
