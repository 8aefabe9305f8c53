pub mod input;
pub mod notice;
pub mod session;
pub mod tools;

pub use input::InputEvent;
pub use notice::{Notice, NoticeBoard, NoticeToken};
pub use session::{ClearTicket, PlannerSession, SurfaceState};
pub use tools::{BrushTool, GridMutation};
