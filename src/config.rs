//! Tunables for the reward overlay: sequence timings, geometry, particle rings and the
//! collaborators' animation constants.

use crate::particles::RingConfig;
use crate::state::icon::IconShakeConfig;
use crate::util::{clog, cwarn};
use serde::{Deserialize, Serialize};

/// localStorage key holding an optional JSON override. Read only.
pub const CONFIG_STORAGE_KEY: &str = "ro_overlay_config";

/// Step durations of the open/dismiss/redeem sequences, ms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceTimings {
    pub lift_ms: f64,
    pub shake_step_ms: f64,
    pub open_ms: f64,
    pub glow_white_ms: f64,
    /// Gold glow starts this long after the white one.
    pub glow_gold_delay_ms: f64,
    pub glow_gold_ms: f64,
    pub halves_fade_ms: f64,
    pub reveal_ms: f64,
    pub card_fade_ms: f64,
    pub restore_ms: f64,
    pub return_ms: f64,
    pub redeem_ms: f64,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            lift_ms: 650.0,
            shake_step_ms: 70.0,
            open_ms: 520.0,
            glow_white_ms: 420.0,
            glow_gold_delay_ms: 140.0,
            glow_gold_ms: 640.0,
            halves_fade_ms: 300.0,
            reveal_ms: 480.0,
            card_fade_ms: 220.0,
            restore_ms: 320.0,
            return_ms: 520.0,
            redeem_ms: 420.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Edge of the opened gift, px. The gift is square.
    pub gift_size: f64,
    /// Edge of the fallback anchor when no icon was measured, px.
    pub icon_size: f64,
    pub fallback_margin: f64,
    pub backdrop_opacity: f64,
    pub timings: SequenceTimings,
    /// How far each half travels when the gift splits, px.
    pub split_distance: f64,
    pub lid_tilt_deg: f64,
    pub overshoot: f64,
    pub shake_deg: f64,
    /// Alternating rotation steps of the idle shake (returns to 0 after the last).
    pub shake_steps: usize,
    /// Peak scale of the white glow relative to the gift.
    pub glow_white_scale: f64,
    /// Peak scale of the gold glow; wider than the white one.
    pub glow_gold_scale: f64,
    /// Card starts this many px lower and rises into place.
    pub card_rise: f64,
    pub rings: Vec<RingConfig>,
    pub palette: Vec<String>,
    pub icon: IconShakeConfig,
    pub typewriter_ms_per_char: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            gift_size: 180.0,
            icon_size: 48.0,
            fallback_margin: 16.0,
            backdrop_opacity: 0.85,
            timings: SequenceTimings::default(),
            split_distance: 70.0,
            lid_tilt_deg: -14.0,
            overshoot: 1.7,
            shake_deg: 7.0,
            shake_steps: 6,
            glow_white_scale: 1.6,
            glow_gold_scale: 2.4,
            card_rise: 40.0,
            rings: vec![RingConfig::inner(), RingConfig::outer()],
            palette: vec![
                "#ffd54a".to_string(),
                "#ffb300".to_string(),
                "#fff8e1".to_string(),
                "#ffe082".to_string(),
            ],
            icon: IconShakeConfig::default(),
            typewriter_ms_per_char: 28.0,
        }
    }
}

impl OverlayConfig {
    /// Defaults, overridden by the JSON stored under `CONFIG_STORAGE_KEY` when present.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(CONFIG_STORAGE_KEY) {
                    clog("overlay config override found");
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    /// Parse an override. Missing fields keep their defaults; malformed input yields defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                cwarn(&format!("ignoring malformed overlay config: {e}"));
                Self::default()
            }
        }
    }

    pub fn particles_per_burst(&self) -> usize {
        self.rings.iter().map(|r| r.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_burst_is_two_rings() {
        let cfg = OverlayConfig::default();
        assert_eq!(cfg.rings.len(), 2);
        assert_eq!(cfg.particles_per_burst(), 48);
        assert!(cfg.glow_gold_scale > cfg.glow_white_scale);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = OverlayConfig::from_json(r#"{"gift_size": 220, "timings": {"lift_ms": 900}}"#);
        assert_eq!(cfg.gift_size, 220.0);
        assert_eq!(cfg.timings.lift_ms, 900.0);
        assert_eq!(cfg.timings.open_ms, SequenceTimings::default().open_ms);
        assert_eq!(cfg.particles_per_burst(), 48);
    }

    #[test]
    fn malformed_override_falls_back() {
        assert_eq!(OverlayConfig::from_json("{not json"), OverlayConfig::default());
    }
}
