//! Gift-unboxing overlay sequencer.
//!
//! Moves the gift from the nav-icon anchor to screen center through the forward phases
//! (lift, shake, split-open, glow, reveal) and back again on dismiss, or fades it out for
//! good on redeem. It never touches the DOM: it writes per-layer [`Transform`]s and
//! reports [`OverlayEvent`]s from [`OverlaySequencer::tick`] for the view to act on.

use crate::anim::{Ease, Position, Timeline, TimelineSlot};
use crate::config::OverlayConfig;
use crate::model::{AnchorRect, Layer, OverlayState, Patch, Phase, Transform, Viewport};
use crate::util::clog;
use enum_map::EnumMap;

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    PhaseEntered(Phase),
    IconHidden,
    IconRestored,
    /// Spawn the reveal burst around `center` (screen px).
    BurstRequested { center: (f64, f64) },
    /// Reverse sequence finished; the caller should unmount the overlay.
    Dismissed,
    /// Redeem fade finished; the reward is claimed for good.
    Redeemed,
}

/// Outcome of an open/dismiss/redeem request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Accepted,
    /// The current state does not allow the request; nothing changed.
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
enum Cue {
    Phase(Phase),
    Burst,
}

pub type Layers = EnumMap<Layer, Transform>;

pub struct OverlaySequencer {
    config: OverlayConfig,
    state: OverlayState,
    phase: Phase,
    anchor: Option<AnchorRect>,
    viewport: Viewport,
    layers: Layers,
    slot: TimelineSlot<Layer, Cue>,
    icon_visible: bool,
    /// Events raised by requests, delivered on the next tick.
    pending: Vec<OverlayEvent>,
}

impl OverlaySequencer {
    pub fn new(config: OverlayConfig) -> Self {
        let mut seq = Self {
            config,
            state: OverlayState::Idle,
            phase: Phase::Idle,
            anchor: None,
            viewport: Viewport::default(),
            layers: Layers::default(),
            slot: TimelineSlot::new(),
            icon_visible: true,
            pending: Vec::new(),
        };
        seq.reset_layers();
        seq
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn icon_visible(&self) -> bool {
        self.icon_visible
    }

    /// Anchor captured by the last `open`.
    pub fn anchor(&self) -> Option<AnchorRect> {
        self.anchor
    }

    pub fn layer(&self, layer: Layer) -> Transform {
        self.layers[layer]
    }

    /// Screen rectangle currently covered by the gift container.
    pub fn gift_rect(&self) -> AnchorRect {
        let g = self.layers[Layer::Gift];
        let w = self.config.gift_size * g.scale_x;
        let h = self.config.gift_size * g.scale_y;
        AnchorRect::new(g.x - w * 0.5, g.y - h * 0.5, w, h)
    }

    fn reset_layers(&mut self) {
        let collapsed = Transform {
            opacity: 0.0,
            ..Transform::scaled(0.0)
        };
        self.layers[Layer::Backdrop] = Transform::hidden();
        self.layers[Layer::Gift] = Transform::hidden();
        self.layers[Layer::Lid] = Transform::default();
        self.layers[Layer::Base] = Transform::default();
        self.layers[Layer::GlowWhite] = collapsed;
        self.layers[Layer::GlowGold] = collapsed;
        self.layers[Layer::Card] = Transform {
            y: self.config.card_rise,
            opacity: 0.0,
            ..Transform::scaled(0.6)
        };
    }

    /// Gift transform that exactly covers the anchor, stretched per axis when the
    /// anchor is not square.
    fn anchor_transform(&self, anchor: &AnchorRect) -> Transform {
        let (cx, cy) = anchor.center();
        let size = self.config.gift_size;
        if size > 0.0 {
            Transform::at(cx, cy, anchor.width / size, anchor.height / size)
        } else {
            Transform::at(cx, cy, 1.0, 1.0)
        }
    }

    fn ignore(&self, what: &str) -> Request {
        clog(&format!("overlay: {what} ignored in {:?}", self.state));
        Request::Ignored
    }

    /// Start the forward sequence. `anchor` is the icon's rectangle; `None` falls back to
    /// bottom-center of the viewport.
    pub fn open(&mut self, anchor: Option<AnchorRect>, viewport: Viewport) -> Request {
        if self.state != OverlayState::Idle {
            return self.ignore("open");
        }
        let cfg = &self.config;
        let anchor = anchor.unwrap_or_else(|| {
            clog("overlay: no anchor, using fallback");
            AnchorRect::fallback(viewport, cfg.icon_size, cfg.fallback_margin)
        });
        self.anchor = Some(anchor);
        self.viewport = viewport;
        self.reset_layers();
        self.layers[Layer::Gift] = self.anchor_transform(&anchor);

        let cfg = &self.config;
        let t = &cfg.timings;
        let (cx, cy) = viewport.center();
        let mut tl = Timeline::new();

        tl.mark(Cue::Phase(Phase::Lifting), Position::After(0.0))
            .tween(
                Layer::Gift,
                Patch::default().xy(cx, cy).scale(1.0),
                t.lift_ms,
                Ease::CubicOut,
                Position::After(0.0),
            )
            .tween(
                Layer::Backdrop,
                Patch::default().opacity(cfg.backdrop_opacity),
                t.lift_ms * 0.8,
                Ease::QuadOut,
                Position::WithPrevious(0.0),
            );

        tl.mark(Cue::Phase(Phase::ShakeBurst), Position::After(0.0));
        for i in 0..cfg.shake_steps {
            let deg = if i % 2 == 0 { cfg.shake_deg } else { -cfg.shake_deg };
            tl.tween(
                Layer::Gift,
                Patch::default().rotation(deg),
                t.shake_step_ms,
                Ease::SineInOut,
                Position::After(0.0),
            );
        }
        tl.tween(
            Layer::Gift,
            Patch::default().rotation(0.0),
            t.shake_step_ms,
            Ease::SineInOut,
            Position::After(0.0),
        );

        // halves split in opposite directions
        tl.mark(Cue::Phase(Phase::Opening), Position::After(0.0))
            .tween(
                Layer::Lid,
                Patch::default().y(-cfg.split_distance).rotation(cfg.lid_tilt_deg),
                t.open_ms,
                Ease::BackOut(cfg.overshoot),
                Position::WithPrevious(0.0),
            )
            .tween(
                Layer::Base,
                Patch::default().y(cfg.split_distance * 0.6),
                t.open_ms,
                Ease::BackOut(cfg.overshoot),
                Position::WithPrevious(0.0),
            );

        // gold sits behind the white glow and peaks later and wider
        tl.mark(Cue::Phase(Phase::GlowPeak), Position::WithPrevious(t.open_ms * 0.35))
            .tween(
                Layer::GlowWhite,
                Patch::default().scale(cfg.glow_white_scale).opacity(1.0),
                t.glow_white_ms,
                Ease::CubicOut,
                Position::WithPrevious(0.0),
            )
            .tween(
                Layer::GlowGold,
                Patch::default().scale(cfg.glow_gold_scale).opacity(0.9),
                t.glow_gold_ms,
                Ease::CubicOut,
                Position::WithPrevious(t.glow_gold_delay_ms),
            );

        tl.tween(
            Layer::Lid,
            Patch::default().opacity(0.0),
            t.halves_fade_ms,
            Ease::QuadOut,
            Position::After(-t.halves_fade_ms * 0.5),
        )
        .tween(
            Layer::Base,
            Patch::default().opacity(0.0),
            t.halves_fade_ms,
            Ease::QuadOut,
            Position::WithPrevious(0.0),
        );

        tl.mark(
            Cue::Phase(Phase::ContentReveal),
            Position::After(-t.halves_fade_ms * 0.5),
        )
        .mark(Cue::Burst, Position::WithPrevious(0.0))
        .tween(
            Layer::Card,
            Patch::default().y(0.0).scale(1.0).opacity(1.0),
            t.reveal_ms,
            Ease::BackOut(cfg.overshoot),
            Position::WithPrevious(0.0),
        )
        .mark(Cue::Phase(Phase::Settled), Position::After(0.0));

        self.slot.play(tl);
        self.state = OverlayState::Opening;
        self.hide_icon();
        Request::Accepted
    }

    /// Reverse the open sequence back onto the captured anchor. Only allowed once settled.
    pub fn dismiss(&mut self) -> Request {
        if self.state != OverlayState::Settled {
            return self.ignore("dismiss");
        }
        let anchor = self.anchor.unwrap_or_else(|| {
            AnchorRect::fallback(self.viewport, self.config.icon_size, self.config.fallback_margin)
        });
        let home = self.anchor_transform(&anchor);
        let t = &self.config.timings;
        let collapse = Patch::default().scale(0.0).opacity(0.0);
        let mut tl = Timeline::new();

        tl.tween(
            Layer::Card,
            Patch::default().opacity(0.0).scale(0.9),
            t.card_fade_ms,
            Ease::QuadOut,
            Position::After(0.0),
        )
        .tween(
            Layer::Lid,
            Patch::to(Transform::default()),
            t.restore_ms,
            Ease::CubicOut,
            Position::After(0.0),
        )
        .tween(
            Layer::Base,
            Patch::to(Transform::default()),
            t.restore_ms,
            Ease::CubicOut,
            Position::WithPrevious(0.0),
        )
        .tween(Layer::GlowWhite, collapse, t.restore_ms, Ease::QuadOut, Position::WithPrevious(0.0))
        .tween(Layer::GlowGold, collapse, t.restore_ms, Ease::QuadOut, Position::WithPrevious(0.0))
        .tween(
            Layer::Gift,
            Patch::to(home),
            t.return_ms,
            Ease::CubicInOut,
            Position::After(0.0),
        )
        .tween(
            Layer::Backdrop,
            Patch::default().opacity(0.0),
            t.return_ms,
            Ease::QuadOut,
            Position::WithPrevious(0.0),
        );

        self.slot.play(tl);
        self.enter(OverlayState::Dismissing, Phase::Dismissing);
        Request::Accepted
    }

    /// Fade everything out without giving the icon back. Only allowed once settled.
    pub fn redeem(&mut self) -> Request {
        if self.state != OverlayState::Settled {
            return self.ignore("redeem");
        }
        let d = self.config.timings.redeem_ms;
        let fade = Patch::default().opacity(0.0);
        let mut tl = Timeline::new();
        tl.tween(
            Layer::Card,
            Patch::default().opacity(0.0).scale(1.08),
            d,
            Ease::QuadOut,
            Position::After(0.0),
        )
        .tween(Layer::Gift, fade, d, Ease::QuadOut, Position::WithPrevious(0.0))
        .tween(Layer::GlowWhite, fade, d, Ease::QuadOut, Position::WithPrevious(0.0))
        .tween(Layer::GlowGold, fade, d, Ease::QuadOut, Position::WithPrevious(0.0))
        .tween(Layer::Backdrop, fade, d, Ease::QuadOut, Position::WithPrevious(0.0));

        self.slot.play(tl);
        self.enter(OverlayState::Redeeming, Phase::Redeeming);
        Request::Accepted
    }

    /// Kill whatever is running (unmount). Never emits `Dismissed` or `Redeemed`.
    /// `IconRestored` is only reported when the matching `IconHidden` already went out.
    pub fn cancel(&mut self) -> Vec<OverlayEvent> {
        let killed = self.slot.kill();
        let hidden_reported = !self.pending.contains(&OverlayEvent::IconHidden);
        self.pending.clear();
        let mut out = Vec::new();
        match self.state {
            OverlayState::Opening | OverlayState::Settled | OverlayState::Dismissing => {
                self.state = OverlayState::Idle;
                self.phase = Phase::Idle;
                self.reset_layers();
                if hidden_reported {
                    self.restore_icon(&mut out);
                } else {
                    self.icon_visible = true;
                }
            }
            OverlayState::Redeeming => {
                self.state = OverlayState::Redeemed;
            }
            OverlayState::Idle | OverlayState::Redeemed => {}
        }
        if killed {
            clog(&format!("overlay: cancelled, now {:?}", self.state));
        }
        out
    }

    /// Advance the running sequence by `dt` ms.
    pub fn tick(&mut self, dt: f64) -> Vec<OverlayEvent> {
        let mut out = std::mem::take(&mut self.pending);
        let step = self.slot.advance(dt, &mut self.layers);
        for cue in step.fired {
            match cue {
                Cue::Phase(phase) => {
                    self.phase = phase;
                    clog(&format!("overlay phase: {}", phase.label()));
                    out.push(OverlayEvent::PhaseEntered(phase));
                }
                Cue::Burst => out.push(OverlayEvent::BurstRequested {
                    center: self.viewport.center(),
                }),
            }
        }
        if step.completed {
            self.complete(&mut out);
        }
        out
    }

    fn complete(&mut self, out: &mut Vec<OverlayEvent>) {
        match self.state {
            OverlayState::Opening => self.state = OverlayState::Settled,
            OverlayState::Dismissing => {
                self.state = OverlayState::Idle;
                self.phase = Phase::Idle;
                self.restore_icon(out);
                out.push(OverlayEvent::Dismissed);
            }
            OverlayState::Redeeming => {
                self.state = OverlayState::Redeemed;
                out.push(OverlayEvent::Redeemed);
            }
            _ => {}
        }
    }

    fn enter(&mut self, state: OverlayState, phase: Phase) {
        self.state = state;
        self.phase = phase;
        clog(&format!("overlay phase: {}", phase.label()));
        self.pending.push(OverlayEvent::PhaseEntered(phase));
    }

    fn hide_icon(&mut self) {
        if self.icon_visible {
            self.icon_visible = false;
            self.pending.push(OverlayEvent::IconHidden);
        }
    }

    fn restore_icon(&mut self, out: &mut Vec<OverlayEvent>) {
        if !self.icon_visible {
            self.icon_visible = true;
            out.push(OverlayEvent::IconRestored);
        }
    }
}
