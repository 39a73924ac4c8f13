use crate::error::AudioError;
use crate::tone::ToneEvent;

/// An open audio output. Whoever opened it owns it and must `close` it.
pub trait AudioOutput {
    /// Current time on the output's own clock, in seconds. Events are
    /// scheduled against this clock.
    fn current_time(&self) -> f64;

    fn play(&mut self, event: &ToneEvent) -> Result<(), AudioError>;

    fn close(&mut self);
}

/// Factory for audio outputs. Opening may fail when the platform has no
/// audio or refuses it; callers degrade to silence.
pub trait AudioBackend {
    type Output: AudioOutput;

    fn open(&mut self) -> Result<Self::Output, AudioError>;
}

/// Backend for hosts without sound. Every `open` fails with
/// [`AudioError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

/// Output type of [`NullBackend`]; never constructed by it.
#[derive(Debug, Default)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn current_time(&self) -> f64 {
        0.0
    }

    fn play(&mut self, _event: &ToneEvent) -> Result<(), AudioError> {
        Ok(())
    }

    fn close(&mut self) {}
}

impl AudioBackend for NullBackend {
    type Output = NullOutput;

    fn open(&mut self) -> Result<NullOutput, AudioError> {
        Err(AudioError::Unavailable("no audio backend".into()))
    }
}

/// Plays a one-shot event `lead_sec` after the output's current time,
/// logging instead of failing.
pub fn play_now<A: AudioOutput>(output: &mut A, event: impl FnOnce(f64) -> ToneEvent, lead_sec: f64) {
    let at = output.current_time() + lead_sec;
    if let Err(e) = output.play(&event(at)) {
        log::warn!("[audio] one-shot dropped: {}", e);
    }
}
