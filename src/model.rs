//! Core data models for the reward overlay.
//! Geometry, per-layer transforms and the phase/state tags the sequencer moves through.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Named step of the gift sequence. Forward order during open, then one of the exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Lifting,
    ShakeBurst,
    Opening,
    GlowPeak,
    ContentReveal,
    Settled,
    Dismissing,
    Redeeming,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Lifting => "lifting",
            Phase::ShakeBurst => "shake-burst",
            Phase::Opening => "opening",
            Phase::GlowPeak => "glow-peak",
            Phase::ContentReveal => "content-reveal",
            Phase::Settled => "settled",
            Phase::Dismissing => "dismissing",
            Phase::Redeeming => "redeeming",
        }
    }
}

/// Which sequence (if any) currently owns the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayState {
    /// Closed; the icon is showing and `open` is allowed.
    Idle,
    /// Forward sequence running. Dismiss and redeem are ignored.
    Opening,
    /// Card revealed and waiting for input.
    Settled,
    Dismissing,
    Redeeming,
    /// Terminal. The icon stays hidden for the rest of the overlay's life.
    Redeemed,
}

impl OverlayState {
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            OverlayState::Opening | OverlayState::Dismissing | OverlayState::Redeeming
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Screen-space rectangle of the persistent icon, captured once when the overlay opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AnchorRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Bottom-center slot used when no icon was rendered at mount time.
    pub fn fallback(viewport: Viewport, icon_size: f64, bottom_margin: f64) -> Self {
        Self {
            x: viewport.width * 0.5 - icon_size * 0.5,
            y: viewport.height - icon_size - bottom_margin,
            width: icon_size,
            height: icon_size,
        }
    }

    pub fn approx_eq(&self, other: &AnchorRect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Visual layers of the overlay. Particles are not a layer; they live in the particle field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Layer {
    Backdrop,
    /// Container that travels between the anchor and screen center.
    Gift,
    /// Upper half ("lock") of the gift.
    Lid,
    /// Lower half of the gift.
    Base,
    GlowWhite,
    GlowGold,
    Card,
}

/// Translation/scale/rotation/opacity of a single layer.
/// For `Gift` the translation is the center point in screen pixels; other layers are
/// offsets relative to their parent. Scale is per axis so the gift can cover a
/// non-square anchor exactly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Transform {
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Default::default()
        }
    }

    /// Uniform scale on both axes.
    pub fn scaled(scale: f64) -> Self {
        Self {
            scale_x: scale,
            scale_y: scale,
            ..Default::default()
        }
    }

    pub fn at(x: f64, y: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            x,
            y,
            scale_x,
            scale_y,
            ..Default::default()
        }
    }

    /// CSS `transform` value for a layer positioned by offset.
    pub fn css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4}, {:.4}) rotate({:.2}deg)",
            self.x, self.y, self.scale_x, self.scale_y, self.rotation
        )
    }
}

/// Partial transform used as a tween target. Unset fields keep whatever value the
/// layer has when the tween starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
}

impl Patch {
    pub fn to(t: Transform) -> Self {
        Self {
            x: Some(t.x),
            y: Some(t.y),
            scale_x: Some(t.scale_x),
            scale_y: Some(t.scale_y),
            rotation: Some(t.rotation),
            opacity: Some(t.opacity),
        }
    }

    pub fn xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Same scale on both axes.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale_x = Some(scale);
        self.scale_y = Some(scale);
        self
    }

    pub fn rotation(mut self, deg: f64) -> Self {
        self.rotation = Some(deg);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}
