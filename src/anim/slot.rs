use super::timeline::{Advance, Timeline, TweenTarget};

/// Holds at most one running timeline. Playing a new one discards the old one, pending
/// tweens and marks included.
#[derive(Debug)]
pub struct TimelineSlot<K, M> {
    active: Option<Timeline<K, M>>,
}

impl<K, M> Default for TimelineSlot<K, M> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + PartialEq, M: Clone> TimelineSlot<K, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, timeline: Timeline<K, M>) {
        self.active = Some(timeline);
    }

    /// Discard the running timeline. Returns whether one was running.
    pub fn kill(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the running timeline; the slot empties itself once it completes.
    pub fn advance<T: TweenTarget<K>>(&mut self, dt: f64, target: &mut T) -> Advance<M> {
        let Some(tl) = self.active.as_mut() else {
            return Advance::default();
        };
        let step = tl.advance(dt, target);
        if step.completed {
            self.active = None;
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Ease, Position};
    use crate::model::{Layer, Patch, Transform};
    use enum_map::EnumMap;

    #[test]
    fn replaying_discards_previous_marks() {
        let mut slot: TimelineSlot<Layer, &str> = TimelineSlot::new();
        let mut first = Timeline::new();
        first.mark("old", Position::At(100.0));
        slot.play(first);
        let mut second = Timeline::new();
        second
            .tween(Layer::Card, Patch::default().opacity(0.0), 50.0, Ease::Linear, Position::After(0.0))
            .mark("new", Position::After(0.0));
        slot.play(second);
        assert!(slot.is_active());

        let mut layers: EnumMap<Layer, Transform> = EnumMap::default();
        let step = slot.advance(500.0, &mut layers);
        assert_eq!(step.fired, vec!["new"]);
        assert!(step.completed);
        assert!(!slot.is_active());
        assert_eq!(slot.advance(500.0, &mut layers), Advance::default());
    }

    #[test]
    fn kill_reports_running_timeline() {
        let mut slot: TimelineSlot<Layer, ()> = TimelineSlot::new();
        assert!(!slot.kill());
        let mut tl = Timeline::new();
        tl.mark((), Position::At(10.0));
        slot.play(tl);
        assert!(slot.kill());
        assert!(!slot.is_active());
    }
}
