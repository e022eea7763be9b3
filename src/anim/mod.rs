pub mod ease;
pub mod frame;
pub mod slot;
pub mod timeline;

pub use ease::Ease;
pub use frame::FrameLoop;
pub use slot::TimelineSlot;
pub use timeline::{Advance, Position, Timeline, TweenTarget};
