//! Platform-free core of the birthday greeting.
//!
//! Every component here is driven by an explicit clock reading rather than
//! by host timers, so the web and native front-ends (and the tests) decide
//! where time comes from. Side effects leave the core either through the
//! [`AudioOutput`] seam or as event values the caller drains.

pub mod audio;
pub mod clock;
pub mod config;
pub mod confetti;
pub mod constants;
pub mod cutter;
pub mod emitter;
pub mod error;
pub mod player;
pub mod sequencer;
pub mod shell;
pub mod synth;
pub mod tone;
pub mod wishes;

pub use audio::*;
pub use clock::*;
pub use config::*;
pub use confetti::*;
pub use constants::*;
pub use cutter::*;
pub use emitter::*;
pub use error::*;
pub use player::*;
pub use sequencer::*;
pub use shell::*;
pub use synth::*;
pub use tone::*;
pub use wishes::*;
