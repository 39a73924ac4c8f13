//! Looping melody playback.
//!
//! A [`ToneScheduler`] owns at most one [`PlaybackSession`]. The session
//! holds the audio output and the ids of its two outstanding timers (next
//! loop, next sparkle), so ending the session is the only thing needed to
//! silence everything it started.

use crate::audio::{AudioBackend, AudioOutput};
use crate::clock::{Millis, TimerId, TimerQueue};
use crate::config::TuneConfig;
use crate::constants::AUDIO_LEAD_SEC;
use crate::tone::{
    plan_sequence, sequence_duration_ms, sparkle_event, GainEnvelope, Tone, HAPPY_BIRTHDAY,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Playing without sound because no audio output could be opened.
    Silent,
    AlreadyPlaying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TuneTimer {
    Loop { session: u64 },
    Sparkle { session: u64 },
}

/// One start-to-stop run of the melody loop.
#[derive(Debug)]
pub struct PlaybackSession<A> {
    id: u64,
    audio: Option<A>,
    loop_timer: Option<TimerId>,
    sparkle_timer: Option<TimerId>,
    loops_started: u64,
    sparkles: u64,
    started_at: Millis,
}

impl<A> PlaybackSession<A> {
    pub fn is_silent(&self) -> bool {
        self.audio.is_none()
    }

    pub fn loops_started(&self) -> u64 {
        self.loops_started
    }

    pub fn sparkles(&self) -> u64 {
        self.sparkles
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }
}

/// First `at + k * period` (k >= 1) strictly after `now`.
fn next_deadline(at: Millis, period: Millis, now: Millis) -> Millis {
    let next = at + period;
    if next > now {
        return next;
    }
    at + ((now - at) / period + 1) * period
}

pub struct ToneScheduler<A: AudioOutput> {
    tones: Vec<Tone>,
    envelope: GainEnvelope,
    sparkle_period_ms: Millis,
    loop_period_ms: Millis,
    timers: TimerQueue<TuneTimer>,
    session: Option<PlaybackSession<A>>,
    next_session_id: u64,
}

impl<A: AudioOutput> Default for ToneScheduler<A> {
    fn default() -> Self {
        Self::new(&HAPPY_BIRTHDAY, &TuneConfig::default())
    }
}

impl<A: AudioOutput> ToneScheduler<A> {
    pub fn new(tones: &[Tone], config: &TuneConfig) -> Self {
        Self {
            tones: tones.to_vec(),
            envelope: config.envelope,
            sparkle_period_ms: config.sparkle_period_ms.max(1),
            loop_period_ms: sequence_duration_ms(tones).max(1),
            timers: TimerQueue::new(),
            session: None,
            next_session_id: 0,
        }
    }

    /// Begins continuous playback. A second call while playing changes
    /// nothing, so there is never more than one loop chain.
    pub fn start<B>(&mut self, now: Millis, backend: &mut B) -> StartOutcome
    where
        B: AudioBackend<Output = A>,
    {
        if self.session.is_some() {
            log::debug!("[tune] start ignored; already playing");
            return StartOutcome::AlreadyPlaying;
        }
        let audio = match backend.open() {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!("[tune] audio unavailable, continuing silently: {}", e);
                None
            }
        };
        let id = self.next_session_id;
        self.next_session_id += 1;
        let silent = audio.is_none();
        self.session = Some(PlaybackSession {
            id,
            audio,
            loop_timer: None,
            sparkle_timer: None,
            loops_started: 0,
            sparkles: 0,
            started_at: now,
        });
        self.begin_loop(now, now + self.loop_period_ms);
        let sparkle = self
            .timers
            .schedule(now + self.sparkle_period_ms, TuneTimer::Sparkle { session: id });
        if let Some(s) = self.session.as_mut() {
            s.sparkle_timer = Some(sparkle);
        }
        log::info!("[tune] session {} started (silent={})", id, silent);
        if silent {
            StartOutcome::Silent
        } else {
            StartOutcome::Started
        }
    }

    /// Ends the session: clears the playing state, cancels pending timers and
    /// closes the audio output. Returns false when nothing was playing.
    pub fn stop(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        if let Some(t) = session.loop_timer.take() {
            self.timers.cancel(t);
        }
        if let Some(t) = session.sparkle_timer.take() {
            self.timers.cancel(t);
        }
        if let Some(mut audio) = session.audio.take() {
            audio.close();
        }
        log::info!(
            "[tune] session {} stopped after {} loop(s)",
            session.id,
            session.loops_started
        );
        true
    }

    /// Fires every timer due at `now`. A timer that fell more than one
    /// period behind fires once and re-arms on its grid past `now`.
    pub fn advance(&mut self, now: Millis) {
        while let Some((at, timer)) = self.timers.pop_due(now) {
            let live = self.session.as_ref().map(|s| s.id);
            match timer {
                TuneTimer::Loop { session } if live == Some(session) => {
                    if let Some(s) = self.session.as_mut() {
                        s.loop_timer = None;
                    }
                    let next = next_deadline(at, self.loop_period_ms, now);
                    self.begin_loop(at, next);
                }
                TuneTimer::Sparkle { session } if live == Some(session) => {
                    let next = next_deadline(at, self.sparkle_period_ms, now);
                    self.sparkle(next);
                }
                _ => log::debug!("[tune] stale timer ignored"),
            }
        }
    }

    /// Plans one pass of the melody and books the single next-loop timer.
    fn begin_loop(&mut self, at: Millis, next: Millis) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(prev) = session.loop_timer.take() {
            self.timers.cancel(prev);
        }
        session.loops_started += 1;
        if let Some(audio) = session.audio.as_mut() {
            let origin = audio.current_time() + AUDIO_LEAD_SEC;
            for event in plan_sequence(&self.tones, origin, self.envelope) {
                if let Err(e) = audio.play(&event) {
                    log::warn!("[tune] tone dropped: {}", e);
                }
            }
        }
        log::info!(
            "[tune] loop {} scheduled at {}ms",
            session.loops_started,
            at
        );
        let id = session.id;
        session.loop_timer = Some(self.timers.schedule(next, TuneTimer::Loop { session: id }));
    }

    fn sparkle(&mut self, next: Millis) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.sparkles += 1;
        if let Some(audio) = session.audio.as_mut() {
            crate::audio::play_now(audio, sparkle_event, AUDIO_LEAD_SEC);
        }
        let id = session.id;
        session.sparkle_timer = Some(
            self.timers
                .schedule(next, TuneTimer::Sparkle { session: id }),
        );
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_silent(&self) -> bool {
        self.session.as_ref().map(|s| s.is_silent()).unwrap_or(false)
    }

    pub fn session(&self) -> Option<&PlaybackSession<A>> {
        self.session.as_ref()
    }

    pub fn loops_started(&self) -> u64 {
        self.session.as_ref().map(|s| s.loops_started).unwrap_or(0)
    }

    /// Outstanding timers; two while playing (next loop and next sparkle).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn loop_period_ms(&self) -> Millis {
        self.loop_period_ms
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }
}
