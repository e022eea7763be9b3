use crate::anim::FrameLoop;
use crate::config::OverlayConfig;
use crate::model::{AnchorRect, Layer, OverlayState, Transform};
use crate::overlay::{OverlayEvent, OverlaySequencer};
use crate::particles::ParticleField;
use crate::util::{now_ms, viewport};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RewardOverlayProps {
    /// Icon rectangle measured by the parent; `None` uses the bottom-center fallback.
    pub anchor: Option<AnchorRect>,
    pub config: Rc<OverlayConfig>,
    pub reward_label: AttrValue,
    pub on_dismiss: Callback<()>,
    pub on_redeem: Callback<()>,
    pub on_icon_visibility: Callback<bool>,
}

// Route sequencer events to the caller. No RefCell borrow may be held here: emitting can
// re-render the parent (and this component) synchronously.
fn forward(
    events: Vec<OverlayEvent>,
    props: &RewardOverlayProps,
    particles: &RefCell<ParticleField>,
) {
    for event in events {
        match event {
            OverlayEvent::IconHidden => props.on_icon_visibility.emit(false),
            OverlayEvent::IconRestored => props.on_icon_visibility.emit(true),
            OverlayEvent::BurstRequested { center } => {
                particles
                    .borrow_mut()
                    .spawn_burst(center, &props.config.rings);
            }
            OverlayEvent::Dismissed => props.on_dismiss.emit(()),
            OverlayEvent::Redeemed => props.on_redeem.emit(()),
            OverlayEvent::PhaseEntered(_) => {}
        }
    }
}

// Frames keep re-rendering while a sequence runs or sparks are alive; once the overlay
// rests (settled, idle or redeemed) it only redraws when something was reported.
fn needs_redraw(busy: bool, live_particles: usize, events: &[OverlayEvent]) -> bool {
    busy || live_particles > 0 || !events.is_empty()
}

fn layer_style(t: &Transform, extra: &str) -> String {
    format!(
        "position:absolute; inset:0; transform:{}; opacity:{:.3}; {}",
        t.css(),
        t.opacity,
        extra
    )
}

#[function_component(RewardOverlay)]
pub fn reward_overlay(props: &RewardOverlayProps) -> Html {
    let sequencer = use_mut_ref(|| OverlaySequencer::new((*props.config).clone()));
    let particles = use_mut_ref(|| {
        ParticleField::new(now_ms() as u64, props.config.palette.clone())
    });
    let frame_loop = use_mut_ref(|| None::<FrameLoop>);
    let latest = use_mut_ref(|| props.clone());
    *latest.borrow_mut() = props.clone();
    let redraw = use_force_update();

    // open on mount, cancel on unmount
    {
        let sequencer = sequencer.clone();
        let particles = particles.clone();
        let frame_loop = frame_loop.clone();
        let latest = latest.clone();
        use_effect_with((), move |_| {
            let anchor = latest.borrow().anchor;
            sequencer.borrow_mut().open(anchor, viewport());
            let tick_loop = {
                let sequencer = sequencer.clone();
                let particles = particles.clone();
                let latest = latest.clone();
                FrameLoop::start(move |dt| {
                    let (events, busy) = {
                        let mut seq = sequencer.borrow_mut();
                        let events = seq.tick(dt);
                        (events, seq.is_busy())
                    };
                    particles.borrow_mut().tick(dt);
                    let redraw_now = needs_redraw(busy, particles.borrow().live_count(), &events);
                    let props = latest.borrow().clone();
                    forward(events, &props, &particles);
                    if redraw_now {
                        redraw.force_update();
                    }
                })
            };
            *frame_loop.borrow_mut() = Some(tick_loop);
            move || {
                frame_loop.borrow_mut().take();
                let events = sequencer.borrow_mut().cancel();
                particles.borrow_mut().clear();
                let props = latest.borrow().clone();
                forward(events, &props, &particles);
            }
        });
    }

    let on_dismiss_click = {
        let sequencer = sequencer.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            sequencer.borrow_mut().dismiss();
        })
    };
    let on_redeem_click = {
        let sequencer = sequencer.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            sequencer.borrow_mut().redeem();
        })
    };
    let on_backdrop_click = {
        let sequencer = sequencer.clone();
        Callback::from(move |_| {
            sequencer.borrow_mut().dismiss();
        })
    };

    let seq = sequencer.borrow();
    let size = seq.config().gift_size;
    let gift = seq.layer(Layer::Gift);
    let backdrop = seq.layer(Layer::Backdrop);
    let card = seq.layer(Layer::Card);
    let interactive = seq.state() == OverlayState::Settled;
    let gift_style = format!(
        "position:fixed; left:0; top:0; width:{size}px; height:{size}px; transform:translate({:.2}px, {:.2}px) scale({:.4}, {:.4}) rotate({:.2}deg); opacity:{:.3}; pointer-events:none;",
        gift.x - size * 0.5,
        gift.y - size * 0.5,
        gift.scale_x,
        gift.scale_y,
        gift.rotation,
        gift.opacity,
    );
    let card_style = format!(
        "position:fixed; left:50%; top:50%; width:240px; margin-left:-120px; margin-top:-90px; transform:{}; opacity:{:.3}; background:#161b22; border:2px solid #ffb300; border-radius:14px; padding:18px; text-align:center; box-shadow:0 6px 18px rgba(0,0,0,0.6); pointer-events:{};",
        card.css(),
        card.opacity,
        if interactive { "auto" } else { "none" },
    );

    let field = particles.borrow();
    let sparks = field.frames().into_iter().map(|p| {
        let style = format!(
            "position:fixed; left:{:.2}px; top:{:.2}px; width:{:.2}px; height:{:.2}px; margin:-{:.2}px 0 0 -{:.2}px; border-radius:50%; background:{}; opacity:{:.3}; transform:scale({:.3}); pointer-events:none;",
            p.x,
            p.y,
            p.size,
            p.size,
            p.size * 0.5,
            p.size * 0.5,
            p.color,
            p.opacity,
            p.scale,
        );
        html! { <div key={p.id} style={style}></div> }
    });

    html! {<div style="position:fixed; inset:0; z-index:60;">
        <div onclick={on_backdrop_click} style={format!("position:absolute; inset:0; background:#000; opacity:{:.3};", backdrop.opacity)}></div>
        <div style={gift_style}>
            <div style={layer_style(&seq.layer(Layer::GlowGold), "border-radius:50%; background:radial-gradient(circle, rgba(255,179,0,0.85) 0%, rgba(255,179,0,0) 70%);")}></div>
            <div style={layer_style(&seq.layer(Layer::GlowWhite), "border-radius:50%; background:radial-gradient(circle, rgba(255,255,255,0.95) 0%, rgba(255,255,255,0) 65%);")}></div>
            <div style={layer_style(&seq.layer(Layer::Base), "top:45%; background:#c62828; border:3px solid #ffd54a; border-radius:0 0 12px 12px;")}></div>
            <div style={layer_style(&seq.layer(Layer::Lid), "bottom:55%; background:#e53935; border:3px solid #ffd54a; border-radius:12px 12px 4px 4px;")}></div>
        </div>
        { for sparks }
        <div style={card_style}>
            <h3 style="margin:0 0 8px 0; color:#ffd54a;">{"Daily Gift"}</h3>
            <p style="margin:0 0 14px 0; font-size:18px;">{ props.reward_label.clone() }</p>
            <div style="display:flex; gap:10px; justify-content:center;">
                <button onclick={on_redeem_click}>{"Redeem"}</button>
                <button onclick={on_dismiss_click}>{"Later"}</button>
            </div>
        </div>
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    #[test]
    fn resting_overlay_skips_redraw() {
        assert!(!needs_redraw(false, 0, &[]));
    }

    #[test]
    fn redraws_while_anything_moves_or_reports() {
        assert!(needs_redraw(true, 0, &[]));
        assert!(needs_redraw(false, 3, &[]));
        assert!(needs_redraw(false, 0, &[OverlayEvent::PhaseEntered(Phase::Settled)]));
    }
}
