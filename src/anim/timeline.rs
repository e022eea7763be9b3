use super::ease::Ease;
use crate::model::{Patch, Transform};
use enum_map::{EnumArray, EnumMap};

/// Something a timeline can read layer values from and write interpolated values to.
pub trait TweenTarget<K> {
    fn current(&self, key: K) -> Transform;
    fn apply(&mut self, key: K, value: Transform);
}

impl<K: EnumArray<Transform> + Copy> TweenTarget<K> for EnumMap<K, Transform> {
    fn current(&self, key: K) -> Transform {
        self[key]
    }

    fn apply(&mut self, key: K, value: Transform) {
        self[key] = value;
    }
}

/// Where a new entry is placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// After everything added so far, plus a gap in ms. A negative gap overlaps.
    After(f64),
    /// Relative to the start of the previously added entry.
    WithPrevious(f64),
    /// Absolute time in ms from the start of the timeline.
    At(f64),
}

#[derive(Clone, Debug)]
struct TweenEntry<K> {
    key: K,
    patch: Patch,
    start: f64,
    duration: f64,
    ease: Ease,
    /// Captured from the target the first time the tween is reached.
    from: Option<Transform>,
    done: bool,
}

#[derive(Clone, Debug)]
struct MarkEntry<M> {
    at: f64,
    payload: M,
    fired: bool,
}

/// Result of one `advance` call.
#[derive(Clone, Debug, PartialEq)]
pub struct Advance<M> {
    /// Marks reached during this step, in time order.
    pub fired: Vec<M>,
    /// True exactly once: on the step that reached the end of the timeline.
    pub completed: bool,
}

impl<M> Default for Advance<M> {
    fn default() -> Self {
        Self {
            fired: Vec::new(),
            completed: false,
        }
    }
}

/// Ordered tween choreography over keyed layers, with marks that emit events when the
/// playhead passes them.
#[derive(Clone, Debug)]
pub struct Timeline<K, M> {
    tweens: Vec<TweenEntry<K>>,
    marks: Vec<MarkEntry<M>>,
    prev_start: f64,
    end: f64,
    elapsed: f64,
    completed: bool,
}

impl<K, M> Default for Timeline<K, M> {
    fn default() -> Self {
        Self {
            tweens: Vec::new(),
            marks: Vec::new(),
            prev_start: 0.0,
            end: 0.0,
            elapsed: 0.0,
            completed: false,
        }
    }
}

impl<K: Copy + PartialEq, M: Clone> Timeline<K, M> {
    pub fn new() -> Self {
        Self::default()
    }

    fn place(&mut self, pos: Position, duration: f64) -> f64 {
        let start = match pos {
            Position::After(gap) => self.end + gap,
            Position::WithPrevious(offset) => self.prev_start + offset,
            Position::At(t) => t,
        }
        .max(0.0);
        self.prev_start = start;
        self.end = self.end.max(start + duration.max(0.0));
        start
    }

    pub fn tween(
        &mut self,
        key: K,
        patch: Patch,
        duration: f64,
        ease: Ease,
        pos: Position,
    ) -> &mut Self {
        let start = self.place(pos, duration);
        let entry = TweenEntry {
            key,
            patch,
            start,
            duration: duration.max(0.0),
            ease,
            from: None,
            done: false,
        };
        // keep sorted by start; equal starts stay in insertion order
        let idx = self.tweens.partition_point(|t| t.start <= start);
        self.tweens.insert(idx, entry);
        self
    }

    pub fn mark(&mut self, payload: M, pos: Position) -> &mut Self {
        let at = self.place(pos, 0.0);
        let idx = self.marks.partition_point(|m| m.at <= at);
        self.marks.insert(
            idx,
            MarkEntry {
                at,
                payload,
                fired: false,
            },
        );
        self
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Move the playhead forward by `dt` ms, writing every reached tween into `target`.
    pub fn advance<T: TweenTarget<K>>(&mut self, dt: f64, target: &mut T) -> Advance<M> {
        if self.completed {
            return Advance::default();
        }
        self.elapsed += dt.max(0.0);
        let now = self.elapsed;

        for i in 0..self.tweens.len() {
            if self.tweens[i].start > now {
                break;
            }
            if self.tweens[i].done {
                continue;
            }
            if self.tweens[i].from.is_none() {
                let key = self.tweens[i].key;
                let patch = self.tweens[i].patch;
                // later tween takes the fields it animates away from earlier running ones
                for earlier in self.tweens[..i].iter_mut() {
                    if earlier.key == key && !earlier.done {
                        earlier.patch = earlier.patch.without(&patch);
                        if earlier.patch.is_empty() {
                            earlier.done = true;
                        }
                    }
                }
                self.tweens[i].from = Some(target.current(key));
            }
            let tw = &mut self.tweens[i];
            let progress = if tw.duration <= 0.0 {
                1.0
            } else {
                ((now - tw.start) / tw.duration).min(1.0)
            };
            let from = tw.from.unwrap_or_default();
            let mut value = target.current(tw.key);
            tw.patch.blend_onto(&from, &mut value, tw.ease.apply(progress));
            target.apply(tw.key, value);
            if progress >= 1.0 {
                tw.done = true;
            }
        }

        let mut out = Advance::default();
        for m in self.marks.iter_mut() {
            if m.at > now {
                break;
            }
            if !m.fired {
                m.fired = true;
                out.fired.push(m.payload.clone());
            }
        }
        if now >= self.end {
            self.completed = true;
            out.completed = true;
        }
        out
    }

}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.scale_x.is_none()
            && self.scale_y.is_none()
            && self.rotation.is_none()
            && self.opacity.is_none()
    }

    /// Copy of `self` with every field that `other` sets cleared.
    pub fn without(&self, other: &Patch) -> Patch {
        let keep = |mine: Option<f64>, theirs: Option<f64>| match theirs {
            Some(_) => None,
            None => mine,
        };
        Patch {
            x: keep(self.x, other.x),
            y: keep(self.y, other.y),
            scale_x: keep(self.scale_x, other.scale_x),
            scale_y: keep(self.scale_y, other.scale_y),
            rotation: keep(self.rotation, other.rotation),
            opacity: keep(self.opacity, other.opacity),
        }
    }

    /// Write the eased mix between `from` and this patch into the set fields of `out`.
    pub fn blend_onto(&self, from: &Transform, out: &mut Transform, eased: f64) {
        let mix = |a: f64, b: f64| a + (b - a) * eased;
        if let Some(x) = self.x {
            out.x = mix(from.x, x);
        }
        if let Some(y) = self.y {
            out.y = mix(from.y, y);
        }
        if let Some(sx) = self.scale_x {
            out.scale_x = mix(from.scale_x, sx);
        }
        if let Some(sy) = self.scale_y {
            out.scale_y = mix(from.scale_y, sy);
        }
        if let Some(r) = self.rotation {
            out.rotation = mix(from.rotation, r);
        }
        if let Some(o) = self.opacity {
            out.opacity = mix(from.opacity, o);
        }
    }
}
