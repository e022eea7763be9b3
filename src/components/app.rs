use super::{dialogue_box::DialogueBox, gift_icon::GiftIcon, reward_overlay::RewardOverlay};
use crate::config::OverlayConfig;
use crate::model::AnchorRect;
use crate::util::clog;
use yew::prelude::*;

const DAILY_REWARD_COINS: u64 = 250;

// Mock lobby dialogue, one entry per step.
const LOBBY_DIALOGUE: &[&[&str]] = &[
    &["Welcome back!", "Your daily gift is waiting in the bar above."],
    &["Tap the gift to open it.", "You can keep it for later or redeem it right away."],
    &["Tournaments refresh every hour.", "Good luck at the tables!"],
];

// One overlay mount. A new id remounts the overlay so every open starts fresh.
#[derive(Clone, PartialEq)]
struct OpenRequest {
    id: u32,
    anchor: Option<AnchorRect>,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| OverlayConfig::load());
    let open_request = use_state(|| None::<OpenRequest>);
    let next_id = use_mut_ref(|| 0_u32);
    let icon_hidden = use_state(|| false);
    let redeemed = use_state(|| false);
    let coins = use_state(|| 1_200_u64);
    let dialogue_step = use_state(|| 0_usize);

    let on_open = {
        let open_request = open_request.clone();
        let next_id = next_id.clone();
        let redeemed = redeemed.clone();
        Callback::from(move |anchor: Option<AnchorRect>| {
            if open_request.is_some() || *redeemed {
                return;
            }
            let id = {
                let mut n = next_id.borrow_mut();
                *n += 1;
                *n
            };
            open_request.set(Some(OpenRequest { id, anchor }));
        })
    };
    let on_dismiss = {
        let open_request = open_request.clone();
        Callback::from(move |_| open_request.set(None))
    };
    let on_redeem = {
        let open_request = open_request.clone();
        let redeemed = redeemed.clone();
        let coins = coins.clone();
        Callback::from(move |_| {
            clog("daily gift redeemed");
            redeemed.set(true);
            coins.set(*coins + DAILY_REWARD_COINS);
            open_request.set(None);
        })
    };
    let on_icon_visibility = {
        let icon_hidden = icon_hidden.clone();
        Callback::from(move |visible: bool| icon_hidden.set(!visible))
    };
    let on_dialogue_complete = Callback::from(|step: usize| {
        clog(&format!("dialogue step {step} shown"));
    });
    let on_dialogue_advance = {
        let dialogue_step = dialogue_step.clone();
        Callback::from(move |_| {
            dialogue_step.set((*dialogue_step + 1) % LOBBY_DIALOGUE.len());
        })
    };

    let lines: Vec<AttrValue> = LOBBY_DIALOGUE[*dialogue_step]
        .iter()
        .map(|l| AttrValue::from(*l))
        .collect();

    let overlay = match &*open_request {
        Some(req) => html! { <RewardOverlay
            key={req.id}
            anchor={req.anchor}
            config={config.clone()}
            reward_label={format!("{DAILY_REWARD_COINS} coins")}
            on_dismiss={on_dismiss}
            on_redeem={on_redeem}
            on_icon_visibility={on_icon_visibility}
        /> },
        None => html! {},
    };

    html! {<div id="root" style="position:relative; width:100vw; height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
        <div id="top-bar" style="display:flex; align-items:center; justify-content:space-between; padding:8px 14px; background:#161b22; border-bottom:1px solid #30363d;">
            <div style="font-weight:600;">{"Lobby"}</div>
            <div style="display:flex; align-items:center; gap:14px;">
                <div>{ format!("🪙 {}", *coins) }</div>
                <GiftIcon hidden={*icon_hidden} redeemed={*redeemed} shake={config.icon.clone()} on_open={on_open} />
            </div>
        </div>
        <div style="position:absolute; left:16px; right:16px; bottom:24px;">
            <DialogueBox step={*dialogue_step} lines={lines} ms_per_char={config.typewriter_ms_per_char} on_complete={on_dialogue_complete} on_advance={on_dialogue_advance} />
        </div>
        { overlay }
    </div>}
}
