mod common;

use birthday_core::*;
use common::RecordingBackend;

fn scheduler() -> ToneScheduler<common::RecordingOutput> {
    ToneScheduler::default()
}

fn melody_events(events: &[ToneEvent]) -> Vec<ToneEvent> {
    events
        .iter()
        .copied()
        .filter(|e| e.frequency.is_constant())
        .collect()
}

fn sparkle_events(events: &[ToneEvent]) -> Vec<ToneEvent> {
    events
        .iter()
        .copied()
        .filter(|e| e.frequency == FrequencyRamp::glide(800.0, 1200.0))
        .collect()
}

#[test]
fn loop_period_is_the_melody_length() {
    let tune = scheduler();
    assert_eq!(tune.loop_period_ms(), 13_000);
    assert_eq!(tune.tones().len(), 13);
}

#[test]
fn start_schedules_one_pass_and_two_timers() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    assert_eq!(tune.start(0, &mut backend), StartOutcome::Started);
    assert!(tune.is_playing());
    assert!(!tune.is_silent());
    assert_eq!(tune.pending_timers(), 2);

    let played = backend.played();
    assert_eq!(played.len(), 12, "twelve sounding tones, the rest is silent");
    let starts: Vec<f64> = played.iter().map(|e| e.start_sec).collect();
    let expected = [0.0, 0.5, 1.0, 2.0, 3.0, 4.0, 6.0, 6.5, 7.0, 8.0, 9.0, 10.0];
    for (got, want) in starts.iter().zip(expected.iter()) {
        assert!((got - (want + AUDIO_LEAD_SEC)).abs() < 1e-9, "{got} vs {want}");
    }
}

#[test]
fn melody_restarts_every_thirteen_seconds() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);

    tune.advance(12_999);
    assert_eq!(tune.loops_started(), 1);
    tune.advance(13_000);
    assert_eq!(tune.loops_started(), 2);
    tune.advance(25_999);
    assert_eq!(tune.loops_started(), 2);
    tune.advance(26_000);
    assert_eq!(tune.loops_started(), 3);

    assert_eq!(melody_events(&backend.played()).len(), 36);
    assert_eq!(tune.pending_timers(), 2);
}

#[test]
fn sparkles_fire_every_three_seconds_while_playing() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    for t in (0..=12_000).step_by(100) {
        tune.advance(t);
    }
    assert_eq!(sparkle_events(&backend.played()).len(), 4);
    assert_eq!(tune.session().map(|s| s.sparkles()), Some(4));

    tune.stop();
    tune.advance(60_000);
    assert_eq!(sparkle_events(&backend.played()).len(), 4);
}

#[test]
fn stop_cancels_timers_and_closes_audio() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    tune.advance(5_000);
    assert!(tune.stop());
    assert!(!tune.is_playing());
    assert_eq!(tune.pending_timers(), 0);
    assert_eq!(backend.closed(), 1);

    let before = backend.played().len();
    tune.advance(100_000);
    assert_eq!(backend.played().len(), before);
}

#[test]
fn stop_without_start_is_a_no_op() {
    let mut tune = scheduler();
    assert!(!tune.stop());
    assert!(!tune.stop());
    assert_eq!(tune.pending_timers(), 0);
}

#[test]
fn second_start_does_not_double_the_loop() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    assert_eq!(tune.start(0, &mut backend), StartOutcome::Started);
    assert_eq!(tune.start(10, &mut backend), StartOutcome::AlreadyPlaying);
    assert_eq!(backend.opened(), 1);
    assert_eq!(tune.pending_timers(), 2);

    tune.advance(13_000);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(melody_events(&backend.played()).len(), 24);
}

#[test]
fn rapid_stop_start_keeps_a_single_chain() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    tune.stop();
    tune.start(200, &mut backend);
    assert_eq!(tune.pending_timers(), 2);

    tune.advance(13_000);
    assert_eq!(tune.loops_started(), 1, "the first session's loop timer is dead");
    tune.advance(13_200);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(tune.pending_timers(), 2);
}

#[test]
fn blocked_audio_degrades_to_a_silent_session() {
    let mut backend = RecordingBackend::failing();
    let mut tune = scheduler();
    assert_eq!(tune.start(0, &mut backend), StartOutcome::Silent);
    assert!(tune.is_playing());
    assert!(tune.is_silent());

    tune.advance(13_000);
    tune.advance(26_000);
    assert_eq!(tune.loops_started(), 3);
    assert!(backend.played().is_empty());
    assert!(tune.stop());
}

#[test]
fn loop_origin_follows_the_audio_clock() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    *backend.audio_time.borrow_mut() = 13.0;
    tune.advance(13_000);
    let second_pass: Vec<ToneEvent> = melody_events(&backend.played())[12..].to_vec();
    assert!((second_pass[0].start_sec - (13.0 + AUDIO_LEAD_SEC)).abs() < 1e-9);
}

#[test]
fn custom_sequences_are_accepted() {
    let tones = [Tone::new(440.0, 0.25), Tone::rest(0.25), Tone::new(880.0, 0.5)];
    let mut backend = RecordingBackend::default();
    let mut tune: ToneScheduler<common::RecordingOutput> =
        ToneScheduler::new(&tones, &TuneConfig::default());
    assert_eq!(tune.loop_period_ms(), 1_000);
    tune.start(0, &mut backend);
    tune.advance(1_000);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(melody_events(&backend.played()).len(), 4);
}

#[test]
fn late_tick_plays_one_pass_and_one_sparkle() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    *backend.audio_time.borrow_mut() = 40.0;
    // e.g. a background tab: no frames for 40 s while the audio clock ran on
    tune.advance(40_000);

    let played = backend.played();
    let melody = melody_events(&played);
    assert_eq!(melody.len(), 24, "the opening pass plus exactly one catch-up pass");
    assert_eq!(sparkle_events(&played).len(), 1);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(tune.pending_timers(), 2);

    let mut late: Vec<f64> = melody[12..].iter().map(|e| e.start_sec).collect();
    assert!(late.iter().all(|t| *t >= 40.0));
    late.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    assert_eq!(late.len(), 12, "no two tones share a start");
}

#[test]
fn late_tick_rearms_on_the_original_grid() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    tune.advance(40_000);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(tune.session().map(|s| s.sparkles()), Some(1));

    tune.advance(41_999);
    assert_eq!(tune.session().map(|s| s.sparkles()), Some(1));
    tune.advance(42_000);
    assert_eq!(tune.session().map(|s| s.sparkles()), Some(2));

    tune.advance(51_999);
    assert_eq!(tune.loops_started(), 2);
    tune.advance(52_000);
    assert_eq!(tune.loops_started(), 3);
}

#[test]
fn tick_landing_exactly_on_a_later_deadline_still_plays_once() {
    let mut backend = RecordingBackend::default();
    let mut tune = scheduler();
    tune.start(0, &mut backend);
    tune.advance(26_000);
    assert_eq!(tune.loops_started(), 2);
    assert_eq!(melody_events(&backend.played()).len(), 24);
    tune.advance(38_999);
    assert_eq!(tune.loops_started(), 2);
    tune.advance(39_000);
    assert_eq!(tune.loops_started(), 3);
}
