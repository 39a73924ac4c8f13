//! Runtime configuration.
//!
//! Every field defaults to the tuning in [`crate::constants`], so an empty
//! JSON object is a valid configuration. Front-ends may supply overrides;
//! anything that fails [`GreetingConfig::validate`] is rejected as a whole.

use crate::clock::Millis;
use crate::constants::*;
use crate::emitter::EmitterSpec;
use crate::error::ConfigError;
use crate::sequencer::{AnimationStage, StageCue};
use crate::tone::GainEnvelope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub tune: TuneConfig,
    pub cake: CakeConfig,
    pub wishes: WishConfig,
    pub particles: EmitterSpec,
    pub bubbles: EmitterSpec,
    pub confetti: ConfettiConfig,
    /// Seed for every decorative random choice.
    pub seed: u64,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            tune: TuneConfig::default(),
            cake: CakeConfig::default(),
            wishes: WishConfig::default(),
            particles: EmitterSpec::PARTICLES,
            bubbles: EmitterSpec::BUBBLES,
            confetti: ConfettiConfig::default(),
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneConfig {
    pub sparkle_period_ms: Millis,
    pub envelope: GainEnvelope,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            sparkle_period_ms: SPARKLE_PERIOD_MS,
            envelope: GainEnvelope::MELODY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeConfig {
    pub vibrate_at_ms: Millis,
    pub explode_at_ms: Millis,
    pub complete_at_ms: Millis,
}

impl Default for CakeConfig {
    fn default() -> Self {
        Self {
            vibrate_at_ms: CAKE_VIBRATE_AT_MS,
            explode_at_ms: CAKE_EXPLODE_AT_MS,
            complete_at_ms: CAKE_COMPLETE_AT_MS,
        }
    }
}

impl CakeConfig {
    pub fn cues(&self) -> [StageCue; 3] {
        [
            StageCue::new(self.vibrate_at_ms, AnimationStage::Vibrating),
            StageCue::new(self.explode_at_ms, AnimationStage::Exploded),
            StageCue::new(self.complete_at_ms, AnimationStage::Complete),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishConfig {
    pub capacity: usize,
    pub latency_ms: Millis,
    pub max_chars: usize,
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            capacity: WISH_CAPACITY,
            latency_ms: WISH_LATENCY_MS,
            max_chars: WISH_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub duration_ms: Millis,
    pub interval_ms: Millis,
    pub base_particles: f32,
    pub shot_lifetime_ms: Millis,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            duration_ms: CONFETTI_DURATION_MS,
            interval_ms: CONFETTI_INTERVAL_MS,
            base_particles: CONFETTI_BASE_PARTICLES,
            shot_lifetime_ms: CONFETTI_SHOT_LIFETIME_MS,
        }
    }
}

impl GreetingConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GreetingConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`GreetingConfig::from_json`], but a document without a `seed`
    /// key takes `fallback_seed` instead of the built-in default.
    pub fn from_json_or_seed(text: &str, fallback_seed: u64) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let has_seed = value.get("seed").is_some();
        let mut config: GreetingConfig = serde_json::from_value(value)?;
        if !has_seed {
            config.seed = fallback_seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tune.sparkle_period_ms == 0 {
            return Err(ConfigError::invalid("tune.sparkle_period_ms must be > 0"));
        }
        match self.tune.envelope {
            GainEnvelope::Swell {
                peak,
                attack_sec,
                floor,
            } => {
                if !(floor > 0.0 && floor < peak) || attack_sec < 0.0 {
                    return Err(ConfigError::invalid(
                        "tune.envelope needs 0 < floor < peak and attack_sec >= 0",
                    ));
                }
            }
            GainEnvelope::Decay { start, floor } => {
                if !(floor > 0.0 && floor < start) {
                    return Err(ConfigError::invalid("tune.envelope needs 0 < floor < start"));
                }
            }
        }
        crate::sequencer::validate_cues(&self.cake.cues())?;
        if self.wishes.capacity == 0 {
            return Err(ConfigError::invalid("wishes.capacity must be > 0"));
        }
        if self.wishes.max_chars == 0 {
            return Err(ConfigError::invalid("wishes.max_chars must be > 0"));
        }
        self.particles.validate("particles")?;
        self.bubbles.validate("bubbles")?;
        if self.confetti.interval_ms == 0 || self.confetti.duration_ms == 0 {
            return Err(ConfigError::invalid(
                "confetti.duration_ms and confetti.interval_ms must be > 0",
            ));
        }
        if self.confetti.base_particles.is_nan() || self.confetti.base_particles < 0.0 {
            return Err(ConfigError::invalid("confetti.base_particles must be >= 0"));
        }
        Ok(())
    }
}
