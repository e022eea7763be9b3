//! Gift/reward overlay for the card game companion app: a phase sequencer that flies a
//! gift from its nav icon to screen center and back, with the icon wiggle and dialogue
//! typewriter that run alongside it, plus the Yew components that mount them.

pub mod anim;
pub mod components;
pub mod config;
pub mod model;
pub mod overlay;
pub mod particles;
pub mod state;
pub mod util;

pub use config::OverlayConfig;
pub use model::{AnchorRect, Layer, OverlayState, Phase, Transform, Viewport};
pub use overlay::{OverlayEvent, OverlaySequencer, Request};
