// Ambient wiggle of the persistent gift icon: two stacked images rocking in opposite
// directions plus a pulsing glow. Free running, paused while the overlay owns the icon.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconShakeConfig {
    pub shake_period_ms: f64,
    pub shake_deg: f64,
    /// Share of each period the icon holds still.
    pub rest_ratio: f64,
    /// Wiggles per active stretch.
    pub wiggles: f64,
    pub glow_period_ms: f64,
    pub glow_scale: (f64, f64),
    pub glow_opacity: (f64, f64),
}

impl Default for IconShakeConfig {
    fn default() -> Self {
        Self {
            shake_period_ms: 1400.0,
            shake_deg: 9.0,
            rest_ratio: 0.45,
            wiggles: 3.0,
            glow_period_ms: 1800.0,
            glow_scale: (1.0, 1.25),
            glow_opacity: (0.35, 0.85),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconMotion {
    Running,
    /// Icon hidden while the overlay is open.
    Suspended,
    /// Reward redeemed; never resumes.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconFrame {
    pub front_deg: f64,
    pub back_deg: f64,
    pub glow_scale: f64,
    pub glow_opacity: f64,
}

pub struct IconShake {
    config: IconShakeConfig,
    motion: IconMotion,
    clock_ms: f64,
}

impl IconShake {
    pub fn new(config: IconShakeConfig) -> Self {
        Self {
            config,
            motion: IconMotion::Running,
            clock_ms: 0.0,
        }
    }

    pub fn motion(&self) -> IconMotion {
        self.motion
    }

    pub fn suspend(&mut self) {
        if self.motion == IconMotion::Running {
            self.motion = IconMotion::Suspended;
        }
    }

    pub fn resume(&mut self) {
        if self.motion == IconMotion::Suspended {
            self.motion = IconMotion::Running;
        }
    }

    pub fn stop(&mut self) {
        self.motion = IconMotion::Stopped;
    }

    /// Follow the overlay: run while the icon shows, stop for good once redeemed.
    pub fn sync(&mut self, icon_visible: bool, redeemed: bool) {
        if redeemed {
            self.stop();
        } else if icon_visible {
            self.resume();
        } else {
            self.suspend();
        }
    }

    /// Returns whether the clock moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.motion != IconMotion::Running {
            return false;
        }
        self.clock_ms += dt.max(0.0);
        true
    }

    pub fn frame(&self) -> Option<IconFrame> {
        if self.motion != IconMotion::Running {
            return None;
        }
        let c = &self.config;
        let angle = if c.shake_period_ms > 0.0 {
            let p = (self.clock_ms % c.shake_period_ms) / c.shake_period_ms;
            let active = 1.0 - c.rest_ratio.clamp(0.0, 1.0);
            if active > 0.0 && p < active {
                let local = p / active;
                c.shake_deg * (local * c.wiggles * TAU).sin() * (1.0 - local)
            } else {
                0.0
            }
        } else {
            0.0
        };
        let pulse = if c.glow_period_ms > 0.0 {
            0.5 - 0.5 * (TAU * self.clock_ms / c.glow_period_ms).cos()
        } else {
            0.0
        };
        let mix = |(lo, hi): (f64, f64)| lo + (hi - lo) * pulse;
        Some(IconFrame {
            front_deg: angle,
            back_deg: -angle,
            glow_scale: mix(c.glow_scale),
            glow_opacity: mix(c.glow_opacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_rotate_in_opposite_directions() {
        let mut icon = IconShake::new(IconShakeConfig::default());
        icon.tick(70.0);
        let f = icon.frame().unwrap();
        assert!(f.front_deg != 0.0);
        assert_eq!(f.front_deg, -f.back_deg);
        assert!(f.front_deg.abs() <= 9.0);
    }

    #[test]
    fn rests_at_the_end_of_each_period() {
        let mut icon = IconShake::new(IconShakeConfig::default());
        icon.tick(1300.0);
        assert_eq!(icon.frame().unwrap().front_deg, 0.0);
    }

    #[test]
    fn glow_pulses_within_range() {
        let mut icon = IconShake::new(IconShakeConfig::default());
        assert_eq!(icon.frame().unwrap().glow_scale, 1.0);
        icon.tick(900.0);
        let f = icon.frame().unwrap();
        assert!((f.glow_scale - 1.25).abs() < 1e-9);
        assert!((f.glow_opacity - 0.85).abs() < 1e-9);
    }

    #[test]
    fn suspended_icon_holds_its_clock() {
        let mut icon = IconShake::new(IconShakeConfig::default());
        icon.tick(100.0);
        icon.sync(false, false);
        assert_eq!(icon.motion(), IconMotion::Suspended);
        assert!(!icon.tick(500.0));
        assert!(icon.frame().is_none());
        icon.sync(true, false);
        assert!(icon.tick(16.0));
        assert!(icon.frame().is_some());
    }

    #[test]
    fn stop_is_permanent() {
        let mut icon = IconShake::new(IconShakeConfig::default());
        icon.sync(false, true);
        icon.resume();
        icon.sync(true, false);
        assert_eq!(icon.motion(), IconMotion::Stopped);
        assert!(icon.frame().is_none());
    }
}
