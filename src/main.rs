use reward_overlay::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
