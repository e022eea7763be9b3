pub mod icon;
pub mod typewriter;

pub use icon::{IconFrame, IconMotion, IconShake, IconShakeConfig};
pub use typewriter::Typewriter;
