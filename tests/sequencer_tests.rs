//! Behavioural properties of the overlay sequencer and its collaborators.

use proptest::prelude::*;
use reward_overlay::particles::{ParticleField, RingConfig};
use reward_overlay::state::Typewriter;
use reward_overlay::{
    AnchorRect, OverlayConfig, OverlayEvent, OverlaySequencer, OverlayState, Phase, Request,
    Viewport,
};

fn phone() -> Viewport {
    Viewport::new(390.0, 844.0)
}

fn settle(seq: &mut OverlaySequencer, frame: f64) -> Vec<OverlayEvent> {
    let mut out = Vec::new();
    for _ in 0..10_000 {
        out.extend(seq.tick(frame));
        if !seq.is_busy() {
            break;
        }
    }
    out
}

fn count(events: &[OverlayEvent], wanted: &OverlayEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

#[test]
fn icon_at_40_800_round_trips() {
    let anchor = AnchorRect::new(40.0, 800.0, 48.0, 48.0);
    let mut seq = OverlaySequencer::new(OverlayConfig::default());
    assert_eq!(seq.open(Some(anchor), phone()), Request::Accepted);
    settle(&mut seq, 16.0);
    assert_eq!(seq.anchor(), Some(anchor));
    assert_eq!(seq.dismiss(), Request::Accepted);
    settle(&mut seq, 16.0);
    let rect = seq.gift_rect();
    assert!(rect.approx_eq(&anchor, 0.01), "gift ended at {rect:?}");
}

#[test]
fn non_square_icon_round_trips() {
    let anchor = AnchorRect::new(40.0, 800.0, 48.0, 64.0);
    let mut seq = OverlaySequencer::new(OverlayConfig::default());
    seq.open(Some(anchor), phone());
    settle(&mut seq, 16.0);
    seq.dismiss();
    settle(&mut seq, 16.0);
    let rect = seq.gift_rect();
    assert!(rect.approx_eq(&anchor, 0.01), "gift ended at {rect:?}");
}

#[test]
fn unmount_before_first_frame_reports_nothing() {
    let mut seq = OverlaySequencer::new(OverlayConfig::default());
    seq.open(None, phone());
    assert!(seq.cancel().is_empty());
    assert!(seq.icon_visible());
    assert_eq!(seq.open(None, phone()), Request::Accepted);
}

#[test]
fn missing_icon_still_settles() {
    let cfg = OverlayConfig::default();
    let mut seq = OverlaySequencer::new(cfg.clone());
    seq.open(None, phone());
    let events = settle(&mut seq, 16.0);
    assert_eq!(seq.state(), OverlayState::Settled);
    assert_eq!(count(&events, &OverlayEvent::PhaseEntered(Phase::Settled)), 1);
    let expected = AnchorRect::fallback(phone(), cfg.icon_size, cfg.fallback_margin);
    assert_eq!(seq.anchor(), Some(expected));
}

#[test]
fn dismiss_then_reopen_restores_icon_once_per_dismiss() {
    let mut seq = OverlaySequencer::new(OverlayConfig::default());
    let mut events = Vec::new();
    for _ in 0..3 {
        assert_eq!(seq.open(None, phone()), Request::Accepted);
        events.extend(settle(&mut seq, 16.0));
        assert_eq!(seq.dismiss(), Request::Accepted);
        events.extend(settle(&mut seq, 16.0));
        // a second dismiss after closing does nothing
        assert_eq!(seq.dismiss(), Request::Ignored);
        events.extend(seq.tick(16.0));
    }
    assert_eq!(count(&events, &OverlayEvent::IconHidden), 3);
    assert_eq!(count(&events, &OverlayEvent::IconRestored), 3);
    assert_eq!(count(&events, &OverlayEvent::Dismissed), 3);
    assert!(seq.icon_visible());
}

#[test]
fn redeem_never_restores_icon() {
    let mut seq = OverlaySequencer::new(OverlayConfig::default());
    seq.open(None, phone());
    let mut events = settle(&mut seq, 16.0);
    seq.redeem();
    events.extend(settle(&mut seq, 16.0));
    assert_eq!(seq.open(None, phone()), Request::Ignored);
    events.extend(seq.cancel());
    for _ in 0..100 {
        events.extend(seq.tick(16.0));
    }
    assert_eq!(count(&events, &OverlayEvent::IconRestored), 0);
    assert_eq!(count(&events, &OverlayEvent::Redeemed), 1);
    assert!(!seq.icon_visible());
}

#[test]
fn burst_leaves_no_particles_two_seconds_later() {
    let cfg = OverlayConfig::default();
    let mut seq = OverlaySequencer::new(cfg.clone());
    let mut field = ParticleField::new(42, cfg.palette.clone());
    seq.open(None, phone());
    let mut spawned = 0;
    let mut since_burst: Option<f64> = None;
    for _ in 0..400 {
        for event in seq.tick(16.0) {
            if let OverlayEvent::BurstRequested { center } = event {
                spawned += field.spawn_burst(center, &cfg.rings);
                since_burst = Some(0.0);
            }
        }
        field.tick(16.0);
        if let Some(t) = since_burst.as_mut() {
            *t += 16.0;
        }
    }
    assert_eq!(spawned, 48);
    assert!(since_burst.unwrap_or(0.0) >= 2000.0);
    assert_eq!(field.live_count(), 0);
}

#[derive(Clone, Debug)]
enum Poke {
    Dismiss,
    Redeem,
    Open,
}

fn poke() -> impl Strategy<Value = Poke> {
    prop_oneof![Just(Poke::Dismiss), Just(Poke::Redeem), Just(Poke::Open)]
}

proptest! {
    #[test]
    fn requests_during_open_have_no_effect(
        frame in 1.0f64..120.0,
        pokes in prop::collection::vec((0usize..200, poke()), 0..12),
    ) {
        let mut seq = OverlaySequencer::new(OverlayConfig::default());
        seq.open(None, phone());
        let mut events = Vec::new();
        let mut tick = 0usize;
        while seq.state() == OverlayState::Opening {
            for (at, p) in &pokes {
                if *at == tick {
                    let r = match p {
                        Poke::Dismiss => seq.dismiss(),
                        Poke::Redeem => seq.redeem(),
                        Poke::Open => seq.open(None, phone()),
                    };
                    prop_assert_eq!(r, Request::Ignored);
                }
            }
            events.extend(seq.tick(frame));
            tick += 1;
        }
        prop_assert_eq!(seq.state(), OverlayState::Settled);
        prop_assert_eq!(count(&events, &OverlayEvent::PhaseEntered(Phase::Settled)), 1);
        prop_assert_eq!(count(&events, &OverlayEvent::Dismissed), 0);
        prop_assert_eq!(count(&events, &OverlayEvent::Redeemed), 0);
        prop_assert_eq!(count(&events, &OverlayEvent::IconHidden), 1);
    }

    #[test]
    fn burst_size_is_sum_of_rings(
        counts in prop::collection::vec(0usize..40, 1..5),
        seed in any::<u64>(),
    ) {
        let rings: Vec<RingConfig> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| RingConfig { count: *c, delay_ms: i as f64 * 80.0, ..RingConfig::inner() })
            .collect();
        let mut field = ParticleField::new(seed, vec!["#fff".into()]);
        let added = field.spawn_burst((0.0, 0.0), &rings);
        prop_assert_eq!(added, counts.iter().sum::<usize>());
        let longest = rings.iter().map(RingConfig::max_lifetime_ms).fold(0.0, f64::max);
        let mut t = 0.0;
        while t <= longest {
            field.tick(16.0);
            t += 16.0;
        }
        prop_assert_eq!(field.live_count(), 0);
    }

    #[test]
    fn typewriter_completes_once_per_text_set(
        changes in prop::collection::vec(0usize..30, 1..8),
    ) {
        // each entry: ticks to wait before switching to the next step
        let mut tw = Typewriter::new(10.0);
        let mut completions = vec![0usize; changes.len()];
        for (step, wait) in changes.iter().enumerate() {
            tw.set_text(step, &["hello there", "general"]);
            for _ in 0..*wait {
                if tw.tick(16.0) {
                    completions[step] += 1;
                }
            }
        }
        let last = changes.len() - 1;
        for _ in 0..100 {
            if tw.tick(16.0) {
                completions[last] += 1;
            }
        }
        prop_assert!(completions.iter().all(|c| *c <= 1));
        prop_assert_eq!(completions[last], 1);
    }
}
