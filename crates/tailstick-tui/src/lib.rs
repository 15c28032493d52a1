pub mod event;
pub mod pane;
pub mod viewport;

pub use event::{AppEvent, EventPump};
pub use pane::FollowPane;
pub use viewport::TranscriptRegion;
