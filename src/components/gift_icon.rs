use crate::anim::FrameLoop;
use crate::model::AnchorRect;
use crate::state::icon::{IconMotion, IconShake, IconShakeConfig};
use crate::util::element_rect;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GiftIconProps {
    /// The overlay has taken over the icon.
    pub hidden: bool,
    /// Reward claimed; the icon never comes back.
    pub redeemed: bool,
    pub shake: IconShakeConfig,
    /// Emits the icon's own screen rectangle, or `None` if it could not be measured.
    pub on_open: Callback<Option<AnchorRect>>,
}

#[function_component(GiftIcon)]
pub fn gift_icon(props: &GiftIconProps) -> Html {
    let node_ref = use_node_ref();
    let shake = use_mut_ref(|| IconShake::new(props.shake.clone()));
    let frame_loop = use_mut_ref(|| None::<FrameLoop>);
    let redraw = use_force_update();

    // run only while visible, stop for good after redeem
    {
        let shake = shake.clone();
        let frame_loop = frame_loop.clone();
        let deps = (props.hidden, props.redeemed);
        use_effect_with(deps, move |(hidden, redeemed)| {
            shake.borrow_mut().sync(!*hidden, *redeemed);
            if shake.borrow().motion() == IconMotion::Running {
                let shake = shake.clone();
                let redraw = redraw.clone();
                *frame_loop.borrow_mut() = Some(FrameLoop::start(move |dt| {
                    shake.borrow_mut().tick(dt);
                    redraw.force_update();
                }));
            } else {
                redraw.force_update();
            }
            move || {
                frame_loop.borrow_mut().take();
            }
        });
    }

    let onclick = {
        let node_ref = node_ref.clone();
        let cb = props.on_open.clone();
        let blocked = props.hidden || props.redeemed;
        Callback::from(move |_| {
            if blocked {
                return;
            }
            let rect = node_ref
                .cast::<web_sys::Element>()
                .map(|el| element_rect(&el));
            cb.emit(rect);
        })
    };

    if props.redeemed {
        return html! {};
    }

    let frame = shake.borrow().frame();
    let (front, back, glow_scale, glow_opacity) = match frame {
        Some(f) => (f.front_deg, f.back_deg, f.glow_scale, f.glow_opacity),
        None => (0.0, 0.0, 1.0, 0.0),
    };
    let visibility = if props.hidden { "hidden" } else { "visible" };

    html! {<div ref={node_ref} {onclick} style={format!("position:relative; width:48px; height:48px; cursor:pointer; visibility:{visibility};")}>
        <div style={format!("position:absolute; inset:-10px; border-radius:50%; background:radial-gradient(circle, rgba(255,213,74,0.9) 0%, rgba(255,213,74,0) 70%); transform:scale({glow_scale:.3}); opacity:{glow_opacity:.3};")}></div>
        <div style={format!("position:absolute; inset:4px; border-radius:8px; background:#c62828; transform:rotate({back:.2}deg);")}></div>
        <div style={format!("position:absolute; inset:4px; display:flex; align-items:center; justify-content:center; font-size:26px; transform:rotate({front:.2}deg);")}>{"🎁"}</div>
    </div>}
}
