use serde::{Deserialize, Serialize};

/// Easing curve applied to a tween's normalized progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    QuadOut,
    CubicOut,
    CubicInOut,
    SineInOut,
    /// Overshoots past 1.0 before settling; the value is the overshoot strength.
    BackOut(f64),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
            Ease::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) * 0.5,
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for ease in [
            Ease::Linear,
            Ease::QuadOut,
            Ease::CubicOut,
            Ease::CubicInOut,
            Ease::SineInOut,
            Ease::BackOut(1.7),
        ] {
            assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.7).apply(i as f64 / 100.0))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0);
    }
}
