mod common;

use birthday_core::*;
use common::RecordingBackend;
use std::rc::Rc;

type Page = Greeting<Rc<ManualClock>, RecordingBackend>;

fn page(backend: &RecordingBackend) -> (Rc<ManualClock>, Page) {
    let clock = Rc::new(ManualClock::new(0));
    let mut greeting = Greeting::new(Rc::clone(&clock), backend.clone());
    greeting.mount();
    (clock, greeting)
}

/// Ticks every 100ms up to and including `to`, collecting shell events.
fn run_to(clock: &ManualClock, greeting: &mut Page, to: Millis) -> Vec<(Millis, ShellEvent)> {
    let mut seen = Vec::new();
    while clock.now_ms() < to {
        let next = (clock.now_ms() + 100).min(to);
        clock.set(next);
        greeting.tick();
        seen.extend(greeting.drain_events().into_iter().map(|e| (next, e)));
    }
    seen
}

#[test]
fn surprise_reveals_card_and_starts_music_once() {
    let backend = RecordingBackend::default();
    let (clock, mut greeting) = page(&backend);
    greeting.drain_events();

    assert!(greeting.click_surprise());
    assert_eq!(
        greeting.drain_events(),
        vec![ShellEvent::CardShown, ShellEvent::MusicChanged(true)]
    );
    assert!(greeting.card_visible());
    assert!(greeting.is_playing());
    assert!(greeting.confetti_running());
    assert_eq!(backend.opened(), 1);

    assert!(!greeting.click_surprise());
    assert!(greeting.drain_events().is_empty());

    run_to(&clock, &mut greeting, 250);
    let bursts = greeting
        .registry()
        .count_where(|k| matches!(k, ElementKind::ConfettiBurst { .. }));
    assert_eq!(bursts, 2);
}

#[test]
fn cake_sequence_runs_without_audio() {
    let backend = RecordingBackend::failing();
    let (clock, mut greeting) = page(&backend);
    assert!(greeting.click_surprise());
    assert!(greeting.is_playing(), "silent session still counts as playing");
    greeting.drain_events();

    assert!(greeting.click_cake());
    assert_eq!(greeting.drain_events(), vec![ShellEvent::CakeActivated]);

    let cake: Vec<(Millis, ShellEvent)> = run_to(&clock, &mut greeting, 8_000)
        .into_iter()
        .filter(|(_, e)| {
            matches!(e, ShellEvent::StageChanged(_) | ShellEvent::CakeCompleted)
        })
        .collect();
    assert_eq!(
        cake,
        vec![
            (2_000, ShellEvent::StageChanged(AnimationStage::Vibrating)),
            (4_000, ShellEvent::StageChanged(AnimationStage::Exploded)),
            (7_000, ShellEvent::StageChanged(AnimationStage::Complete)),
            (7_000, ShellEvent::CakeCompleted),
        ]
    );
    assert!(backend.played().is_empty());
}

#[test]
fn explosion_plays_its_own_sound() {
    let backend = RecordingBackend::default();
    let (clock, mut greeting) = page(&backend);
    greeting.click_cake();
    run_to(&clock, &mut greeting, 3_900);
    assert_eq!(backend.opened(), 0);

    run_to(&clock, &mut greeting, 4_000);
    assert_eq!(backend.opened(), 1);
    let played = backend.played();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].waveform, Waveform::Sawtooth);
}

#[test]
fn cake_clicks_are_ignored_mid_sequence_and_reset_when_done() {
    let backend = RecordingBackend::failing();
    let (clock, mut greeting) = page(&backend);
    assert!(greeting.click_cake());
    run_to(&clock, &mut greeting, 3_000);
    assert!(!greeting.click_cake());
    assert_eq!(greeting.stage(), AnimationStage::Vibrating);

    run_to(&clock, &mut greeting, 7_000);
    assert_eq!(greeting.stage(), AnimationStage::Complete);
    assert!(greeting.click_cake());
    assert_eq!(greeting.drain_events(), vec![ShellEvent::CakeReset]);
    assert_eq!(greeting.stage(), AnimationStage::Idle);

    assert!(greeting.click_cake());
    let again = run_to(&clock, &mut greeting, 14_000);
    assert!(again.contains(&(14_000, ShellEvent::CakeCompleted)));
}

#[test]
fn music_toggle_only_works_after_the_surprise() {
    let backend = RecordingBackend::default();
    let (_clock, mut greeting) = page(&backend);
    assert!(!greeting.toggle_music());
    assert!(greeting.drain_events().is_empty());

    greeting.click_surprise();
    greeting.drain_events();
    assert!(!greeting.toggle_music());
    assert_eq!(greeting.drain_events(), vec![ShellEvent::MusicChanged(false)]);
    assert_eq!(backend.closed(), 1);
    assert!(greeting.toggle_music());
    assert_eq!(greeting.drain_events(), vec![ShellEvent::MusicChanged(true)]);
    assert_eq!(backend.opened(), 2);
}

#[test]
fn card_closes_once() {
    let backend = RecordingBackend::default();
    let (_clock, mut greeting) = page(&backend);
    greeting.click_surprise();
    greeting.drain_events();
    greeting.close_card();
    greeting.close_card();
    assert_eq!(greeting.drain_events(), vec![ShellEvent::CardHidden]);
    assert!(!greeting.card_visible());
    assert!(greeting.is_playing(), "closing the card leaves the music alone");
}

#[test]
fn wishes_settle_through_tick() {
    let backend = RecordingBackend::default();
    let (clock, mut greeting) = page(&backend);
    greeting.drain_events();

    assert_eq!(greeting.submit_wish("   "), Err(WishError::Empty));
    assert!(greeting.drain_events().is_empty());

    let id = greeting.submit_wish("cake for breakfast").unwrap();
    assert_eq!(greeting.drain_events(), vec![ShellEvent::WishSubmitting]);
    assert_eq!(greeting.submit_wish("more cake"), Err(WishError::Busy));

    let events = run_to(&clock, &mut greeting, 500);
    assert!(events.contains(&(500, ShellEvent::WishAdded(id))));
    assert_eq!(greeting.wishes().len(), 1);
}

#[test]
fn cutting_counts_slices() {
    let backend = RecordingBackend::default();
    let (clock, mut greeting) = page(&backend);
    greeting.drain_events();
    assert!(greeting.cut_cake());
    assert!(!greeting.cut_cake());
    assert_eq!(greeting.drain_events(), vec![ShellEvent::SlicesChanged(1)]);
    assert!(greeting.is_cutting());

    let events = run_to(&clock, &mut greeting, 500);
    assert!(events.contains(&(500, ShellEvent::CutFinished)));
    assert!(greeting.cut_cake());
    assert_eq!(greeting.slices(), 2);
}

#[test]
fn mounting_starts_both_emitters() {
    let backend = RecordingBackend::default();
    let (_clock, mut greeting) = page(&backend);
    greeting.tick();
    let registry = greeting.registry();
    assert_eq!(registry.count_where(|k| matches!(k, ElementKind::Particle { .. })), 1);
    assert_eq!(registry.count_where(|k| matches!(k, ElementKind::Bubble { .. })), 1);
}

#[test]
fn unmount_leaves_nothing_scheduled() {
    let backend = RecordingBackend::default();
    let (clock, mut greeting) = page(&backend);
    greeting.click_surprise();
    greeting.click_cake();
    run_to(&clock, &mut greeting, 4_500);
    greeting.drain_events();

    greeting.unmount();
    assert_eq!(
        greeting.drain_events(),
        vec![ShellEvent::MusicChanged(false), ShellEvent::CakeReset]
    );
    assert!(!greeting.is_mounted());
    assert!(!greeting.is_playing());
    assert_eq!(greeting.tune().pending_timers(), 0);
    assert_eq!(greeting.cake().pending(), 0);
    assert!(!greeting.confetti_running());
    assert_eq!(backend.closed(), 2, "tune output and explosion output");

    let played = backend.played().len();
    run_to(&clock, &mut greeting, 60_000);
    assert_eq!(backend.played().len(), played);
    assert!(greeting.registry().is_empty());
    assert!(greeting.drain_events().is_empty());
}

#[test]
fn invalid_config_is_refused() {
    let mut config = GreetingConfig::default();
    config.wishes.capacity = 0;
    let result = Greeting::with_config(ManualClock::new(0), NullBackend, config);
    assert!(matches!(result, Err(GreetingError::Config(_))));
}
