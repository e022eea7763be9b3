pub mod app;
pub mod dialogue_box;
pub mod gift_icon;
pub mod reward_overlay;

pub use app::App;
pub use dialogue_box::DialogueBox;
pub use gift_icon::GiftIcon;
pub use reward_overlay::RewardOverlay;
