use crate::anim::FrameLoop;
use crate::state::typewriter::Typewriter;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DialogueBoxProps {
    /// Dialogue step; a new value restarts the reveal.
    pub step: usize,
    pub lines: Vec<AttrValue>,
    pub ms_per_char: f64,
    /// Fired once per step when the last character is shown.
    pub on_complete: Callback<usize>,
    /// Click after the text is fully shown.
    pub on_advance: Callback<()>,
}

#[function_component(DialogueBox)]
pub fn dialogue_box(props: &DialogueBoxProps) -> Html {
    let typewriter = use_mut_ref(|| Typewriter::new(props.ms_per_char));
    let frame_loop = use_mut_ref(|| None::<FrameLoop>);
    let redraw = use_force_update();

    {
        let typewriter = typewriter.clone();
        let frame_loop = frame_loop.clone();
        let lines: Vec<String> = props.lines.iter().map(|l| l.to_string()).collect();
        let on_complete = props.on_complete.clone();
        let redraw = redraw.clone();
        use_effect_with(props.step, move |step| {
            let step = *step;
            typewriter.borrow_mut().set_text(step, &lines);
            let tick_loop = {
                let typewriter = typewriter.clone();
                let frame_loop = frame_loop.clone();
                let redraw = redraw.clone();
                FrameLoop::start(move |dt| {
                    let done = typewriter.borrow_mut().tick(dt);
                    redraw.force_update();
                    if done {
                        frame_loop.borrow_mut().take();
                        on_complete.emit(step);
                    }
                })
            };
            *frame_loop.borrow_mut() = Some(tick_loop);
            move || {
                frame_loop.borrow_mut().take();
            }
        });
    }

    let onclick = {
        let typewriter = typewriter.clone();
        let frame_loop = frame_loop.clone();
        let on_complete = props.on_complete.clone();
        let on_advance = props.on_advance.clone();
        let step = props.step;
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let skipped = typewriter.borrow_mut().finish();
            if skipped {
                frame_loop.borrow_mut().take();
                redraw.force_update();
                on_complete.emit(step);
            } else {
                on_advance.emit(());
            }
        })
    };

    let tw = typewriter.borrow();
    let text = tw.visible_text();
    let hint = if tw.is_complete() { "▼" } else { "" };

    html! {<div {onclick} style="background:rgba(0,0,0,0.8); border:2px solid #30363d; border-radius:12px; padding:14px 18px; min-height:72px; font-size:15px; line-height:1.4; white-space:pre-wrap; cursor:pointer;">
        { text }
        <span style="float:right; opacity:0.7;">{ hint }</span>
    </div>}
}
