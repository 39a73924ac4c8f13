use crate::clock::Millis;
use serde::{Deserialize, Serialize};

/// One step of a melody: a pitch held for a duration, or a rest when the
/// frequency is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_sec: f32,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration_sec: f32) -> Self {
        Self {
            frequency_hz,
            duration_sec,
        }
    }

    pub const fn rest(duration_sec: f32) -> Self {
        Self::new(0.0, duration_sec)
    }

    #[inline]
    pub fn is_rest(&self) -> bool {
        self.frequency_hz <= 0.0
    }
}

const C4: f32 = 261.63;
const D4: f32 = 293.66;
const E4: f32 = 329.63;
const F4: f32 = 349.23;
const G4: f32 = 392.00;

/// The first two lines of "Happy Birthday" followed by a one second rest
/// before the loop repeats.
pub const HAPPY_BIRTHDAY: [Tone; 13] = [
    Tone::new(C4, 0.5), // Hap-
    Tone::new(C4, 0.5), // py
    Tone::new(D4, 1.0), // Birth-
    Tone::new(C4, 1.0), // day
    Tone::new(F4, 1.0), // to
    Tone::new(E4, 2.0), // you
    Tone::new(C4, 0.5),
    Tone::new(C4, 0.5),
    Tone::new(D4, 1.0),
    Tone::new(C4, 1.0),
    Tone::new(G4, 1.0),
    Tone::new(F4, 2.0),
    Tone::rest(1.0),
];

pub fn sequence_duration_sec(tones: &[Tone]) -> f64 {
    tones.iter().map(|t| t.duration_sec as f64).sum()
}

pub fn sequence_duration_ms(tones: &[Tone]) -> Millis {
    (sequence_duration_sec(tones) * 1000.0).round() as Millis
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Pitch over the lifetime of an event. Equal endpoints hold the pitch;
/// otherwise the pitch glides exponentially from `start_hz` to `end_hz`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyRamp {
    pub start_hz: f32,
    pub end_hz: f32,
}

impl FrequencyRamp {
    pub const fn constant(hz: f32) -> Self {
        Self {
            start_hz: hz,
            end_hz: hz,
        }
    }

    pub const fn glide(start_hz: f32, end_hz: f32) -> Self {
        Self { start_hz, end_hz }
    }

    pub fn is_constant(&self) -> bool {
        self.start_hz == self.end_hz
    }

    pub fn value_at(&self, t: f64, duration: f64) -> f32 {
        if self.is_constant() || duration <= 0.0 {
            return self.start_hz;
        }
        let x = (t / duration).clamp(0.0, 1.0) as f32;
        self.start_hz * (self.end_hz / self.start_hz).powf(x)
    }
}

/// Amplitude shape of one oscillation. Both shapes end on a small non-zero
/// floor so the oscillator stops without a click.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GainEnvelope {
    /// Silent start, linear ramp to `peak` over `attack_sec`, then an
    /// exponential decay reaching `floor` at the event end.
    Swell {
        peak: f32,
        attack_sec: f32,
        floor: f32,
    },
    /// Starts at `start` and decays exponentially to `floor` at the end.
    Decay { start: f32, floor: f32 },
}

impl GainEnvelope {
    pub const MELODY: GainEnvelope = GainEnvelope::Swell {
        peak: 0.2,
        attack_sec: 0.1,
        floor: 0.01,
    };

    pub fn value_at(&self, t: f64, duration: f64) -> f32 {
        if t < 0.0 || t > duration {
            return 0.0;
        }
        match *self {
            GainEnvelope::Swell {
                peak,
                attack_sec,
                floor,
            } => {
                let attack = (attack_sec as f64).min(duration);
                if t < attack {
                    return peak * (t / attack) as f32;
                }
                exp_ramp(peak, floor, t - attack, duration - attack)
            }
            GainEnvelope::Decay { start, floor } => exp_ramp(start, floor, t, duration),
        }
    }

    pub fn floor(&self) -> f32 {
        match *self {
            GainEnvelope::Swell { floor, .. } | GainEnvelope::Decay { floor, .. } => floor,
        }
    }
}

#[inline]
fn exp_ramp(from: f32, to: f32, t: f64, span: f64) -> f32 {
    if span <= 0.0 || from <= 0.0 || to <= 0.0 {
        return to;
    }
    let x = (t / span).clamp(0.0, 1.0) as f32;
    from * (to / from).powf(x)
}

/// A single time-bounded oscillation on the audio clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneEvent {
    pub waveform: Waveform,
    pub start_sec: f64,
    pub duration_sec: f64,
    pub frequency: FrequencyRamp,
    pub gain: GainEnvelope,
}

impl ToneEvent {
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }
}

/// Lays the sequence out from `origin_sec`. Each sounding tone starts at the
/// sum of the durations before it; rests advance the offset without
/// producing an event.
pub fn plan_sequence(tones: &[Tone], origin_sec: f64, envelope: GainEnvelope) -> Vec<ToneEvent> {
    let mut events = Vec::with_capacity(tones.len());
    let mut offset = 0.0_f64;
    for tone in tones {
        if !tone.is_rest() {
            events.push(ToneEvent {
                waveform: Waveform::Sine,
                start_sec: origin_sec + offset,
                duration_sec: tone.duration_sec as f64,
                frequency: FrequencyRamp::constant(tone.frequency_hz),
                gain: envelope,
            });
        }
        offset += tone.duration_sec as f64;
    }
    events
}

pub const SPARKLE_DURATION_SEC: f64 = 0.3;
pub const EXPLOSION_DURATION_SEC: f64 = 0.5;

/// Short rising chirp played over the melody.
pub fn sparkle_event(start_sec: f64) -> ToneEvent {
    ToneEvent {
        waveform: Waveform::Sine,
        start_sec,
        duration_sec: SPARKLE_DURATION_SEC,
        frequency: FrequencyRamp::glide(800.0, 1200.0),
        gain: GainEnvelope::Decay {
            start: 0.1,
            floor: 0.01,
        },
    }
}

/// Falling sawtooth burst for the cake explosion.
pub fn explosion_event(start_sec: f64) -> ToneEvent {
    ToneEvent {
        waveform: Waveform::Sawtooth,
        start_sec,
        duration_sec: EXPLOSION_DURATION_SEC,
        frequency: FrequencyRamp::glide(200.0, 50.0),
        gain: GainEnvelope::Decay {
            start: 0.4,
            floor: 0.01,
        },
    }
}
