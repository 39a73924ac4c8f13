//! Small software synthesizer that renders [`ToneEvent`]s to mono samples.
//!
//! Used where no platform oscillator exists (the native preview) and to
//! check envelope shapes in tests.

use crate::tone::{ToneEvent, Waveform};
use std::f32::consts::PI;

#[derive(Clone, Debug)]
struct ActiveVoice {
    event: ToneEvent,
    phase: f32, // radians
}

pub struct Synth {
    sample_rate: f32,
    time_sec: f64,
    voices: Vec<ActiveVoice>,
}

impl Synth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            time_sec: 0.0,
            voices: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Seconds of audio rendered so far; this is the synth's audio clock.
    pub fn current_time(&self) -> f64 {
        self.time_sec
    }

    pub fn schedule(&mut self, event: ToneEvent) {
        if event.duration_sec <= 0.0 || event.end_sec() <= self.time_sec {
            return;
        }
        self.voices.push(ActiveVoice { event, phase: 0.0 });
    }

    /// Voices scheduled or sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn clear(&mut self) {
        self.voices.clear();
    }

    pub fn render(&mut self, out: &mut [f32]) {
        let dt = 1.0 / self.sample_rate as f64;
        for sample in out.iter_mut() {
            *sample = mix_sample(&mut self.voices, self.time_sec, self.sample_rate).tanh();
            self.time_sec += dt;
        }
        let now = self.time_sec;
        self.voices.retain(|v| v.event.end_sec() > now);
    }
}

fn render_wave_sample(phase: f32, wave: Waveform) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Sawtooth => {
            // Map phase 0..2PI to -1..1
            let t = phase / (2.0 * PI);
            2.0 * (t - t.floor()) - 1.0
        }
    }
}

fn mix_sample(voices: &mut [ActiveVoice], now: f64, sample_rate: f32) -> f32 {
    let mut acc = 0.0f32;
    for voice in voices.iter_mut() {
        let ev = &voice.event;
        let t = now - ev.start_sec;
        if t < 0.0 || t > ev.duration_sec {
            continue;
        }
        let amp = ev.gain.value_at(t, ev.duration_sec);
        acc += render_wave_sample(voice.phase, ev.waveform) * amp;
        let freq = ev.frequency.value_at(t, ev.duration_sec);
        voice.phase += 2.0 * PI * freq / sample_rate;
        if voice.phase > 2.0 * PI {
            voice.phase -= 2.0 * PI;
        }
    }
    acc
}
