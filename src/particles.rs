//! Particle burst spawned when the reward card is revealed.
//! Each ring is a batch sharing count/distance/size/delay; every particle flies outward
//! on its own tween and is dropped from the field as soon as that tween ends.

use crate::anim::Ease;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub count: usize,
    /// Travel distance range from the burst center, px.
    pub distance: (f64, f64),
    /// Diameter range, px.
    pub size: (f64, f64),
    pub duration_ms: (f64, f64),
    /// Delay before the whole ring starts, ms.
    pub delay_ms: f64,
    /// Max random deviation from even angular spacing, radians.
    pub angle_jitter: f64,
}

impl RingConfig {
    pub fn inner() -> Self {
        Self {
            count: 20,
            distance: (70.0, 150.0),
            size: (5.0, 10.0),
            duration_ms: (650.0, 1000.0),
            delay_ms: 0.0,
            angle_jitter: 0.25,
        }
    }

    pub fn outer() -> Self {
        Self {
            count: 28,
            distance: (140.0, 260.0),
            size: (3.0, 7.0),
            duration_ms: (850.0, 1350.0),
            delay_ms: 120.0,
            angle_jitter: 0.18,
        }
    }

    /// Time from burst start until the last particle of this ring can finish.
    pub fn max_lifetime_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms.0.max(self.duration_ms.1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub origin: (f64, f64),
    /// Offset from origin at the end of the flight.
    pub offset: (f64, f64),
    pub size: f64,
    pub color: String,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub age_ms: f64,
}

impl Particle {
    pub fn is_finished(&self) -> bool {
        self.age_ms >= self.delay_ms + self.duration_ms
    }

    pub fn sample(&self) -> ParticleFrame<'_> {
        let local = self.age_ms - self.delay_ms;
        if local < 0.0 {
            return ParticleFrame {
                id: self.id,
                x: self.origin.0,
                y: self.origin.1,
                size: self.size,
                scale: 0.0,
                opacity: 0.0,
                color: &self.color,
            };
        }
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (local / self.duration_ms).min(1.0)
        };
        let travel = Ease::CubicOut.apply(progress);
        ParticleFrame {
            id: self.id,
            x: self.origin.0 + self.offset.0 * travel,
            y: self.origin.1 + self.offset.1 * travel,
            size: self.size,
            scale: 1.0 - progress,
            opacity: 1.0 - progress,
            color: &self.color,
        }
    }
}

/// Render-ready snapshot of one particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleFrame<'a> {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub scale: f64,
    pub opacity: f64,
    pub color: &'a str,
}

/// Live particles of the overlay. Nothing outside the overlay reads or mutates them.
pub struct ParticleField {
    rng: fastrand::Rng,
    palette: Vec<String>,
    particles: Vec<Particle>,
    next_id: u64,
    spawned_total: usize,
}

impl ParticleField {
    pub fn new(seed: u64, palette: Vec<String>) -> Self {
        let palette = if palette.is_empty() {
            vec!["#ffd54a".to_string()]
        } else {
            palette
        };
        Self {
            rng: fastrand::Rng::with_seed(seed),
            palette,
            particles: Vec::new(),
            next_id: 0,
            spawned_total: 0,
        }
    }

    fn between(&mut self, range: (f64, f64)) -> f64 {
        let (lo, hi) = range;
        lo + (hi - lo) * self.rng.f64()
    }

    /// Spawn one burst around `center`. Returns how many particles were added.
    pub fn spawn_burst(&mut self, center: (f64, f64), rings: &[RingConfig]) -> usize {
        let mut added = 0;
        for ring in rings {
            if ring.count == 0 {
                continue;
            }
            let step = std::f64::consts::TAU / ring.count as f64;
            for i in 0..ring.count {
                let jitter = (self.rng.f64() * 2.0 - 1.0) * ring.angle_jitter;
                let angle = step * i as f64 + jitter;
                let distance = self.between(ring.distance);
                let size = self.between(ring.size);
                let duration_ms = self.between(ring.duration_ms);
                let color = self.palette[self.rng.usize(..self.palette.len())].clone();
                self.particles.push(Particle {
                    id: self.next_id,
                    origin: center,
                    offset: (angle.cos() * distance, angle.sin() * distance),
                    size,
                    color,
                    delay_ms: ring.delay_ms,
                    duration_ms,
                    age_ms: 0.0,
                });
                self.next_id += 1;
                added += 1;
            }
        }
        self.spawned_total += added;
        added
    }

    /// Age every particle by `dt` ms and drop the finished ones. Returns how many were removed.
    pub fn tick(&mut self, dt: f64) -> usize {
        let before = self.particles.len();
        for p in self.particles.iter_mut() {
            p.age_ms += dt.max(0.0);
        }
        self.particles.retain(|p| !p.is_finished());
        before - self.particles.len()
    }

    pub fn frames(&self) -> Vec<ParticleFrame<'_>> {
        self.particles.iter().map(Particle::sample).collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn spawned_total(&self) -> usize {
        self.spawned_total
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ParticleField {
        ParticleField::new(7, vec!["#fff".into(), "#fc0".into()])
    }

    #[test]
    fn burst_spawns_sum_of_ring_counts() {
        let mut f = field();
        let added = f.spawn_burst((200.0, 400.0), &[RingConfig::inner(), RingConfig::outer()]);
        assert_eq!(added, 48);
        assert_eq!(f.live_count(), 48);
        assert_eq!(f.spawned_total(), 48);
    }

    #[test]
    fn particles_stay_inside_configured_ranges() {
        let mut f = field();
        let ring = RingConfig::outer();
        f.spawn_burst((0.0, 0.0), std::slice::from_ref(&ring));
        for p in f.particles() {
            let d = (p.offset.0 * p.offset.0 + p.offset.1 * p.offset.1).sqrt();
            assert!(d >= ring.distance.0 - 1e-9 && d <= ring.distance.1 + 1e-9);
            assert!(p.size >= ring.size.0 && p.size <= ring.size.1);
            assert!(p.duration_ms >= ring.duration_ms.0 && p.duration_ms <= ring.duration_ms.1);
            assert_eq!(p.delay_ms, 120.0);
        }
    }

    #[test]
    fn delayed_ring_is_invisible_before_it_starts() {
        let mut f = field();
        f.spawn_burst((10.0, 10.0), &[RingConfig::outer()]);
        f.tick(50.0);
        assert!(f.frames().iter().all(|fr| fr.opacity == 0.0 && fr.x == 10.0));
    }

    #[test]
    fn no_particles_left_after_two_seconds() {
        let mut f = field();
        f.spawn_burst((0.0, 0.0), &[RingConfig::inner(), RingConfig::outer()]);
        let mut removed = 0;
        for _ in 0..125 {
            removed += f.tick(16.0);
        }
        assert_eq!(removed, 48);
        assert_eq!(f.live_count(), 0);
        assert_eq!(f.spawned_total(), 48);
    }

    #[test]
    fn same_seed_same_burst() {
        let mut a = field();
        let mut b = field();
        a.spawn_burst((0.0, 0.0), &[RingConfig::inner()]);
        b.spawn_burst((0.0, 0.0), &[RingConfig::inner()]);
        assert_eq!(a.particles(), b.particles());
    }
}
