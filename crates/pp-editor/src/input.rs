//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events from the host into a single
//! `InputEvent` enum consumed by the brush. Coordinates are relative to the
//! drawing surface's top-left corner, in device pixels.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved. `pressed` is true while a button or contact is held,
    /// which turns the move into a drag that paints.
    PointerMove { x: f64, y: f64, pressed: bool },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the surface.
    PointerLeave,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64, pressed: bool) -> Self {
        Self::PointerMove { x, y, pressed }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y } => Some((*x, *y)),
            Self::PointerLeave => None,
        }
    }
}
