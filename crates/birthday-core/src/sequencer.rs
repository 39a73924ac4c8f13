//! One-shot cake explosion sequence.
//!
//! Activation lays every cue out against the activation instant at once, so
//! a late frame can never stretch the sequence: each stage lands at its own
//! offset from activation no matter when the previous one was observed.

use crate::clock::{Millis, TimerId, TimerQueue};
use crate::error::ConfigError;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AnimationStage {
    #[default]
    Idle,
    Vibrating,
    Exploded,
    Complete,
}

impl AnimationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationStage::Idle => "idle",
            AnimationStage::Vibrating => "vibrating",
            AnimationStage::Exploded => "exploded",
            AnimationStage::Complete => "complete",
        }
    }
}

/// Enter `stage` at `offset_ms` after activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageCue {
    pub offset_ms: Millis,
    pub stage: AnimationStage,
}

impl StageCue {
    pub const fn new(offset_ms: Millis, stage: AnimationStage) -> Self {
        Self { offset_ms, stage }
    }
}

pub const CAKE_CUES: [StageCue; 3] = [
    StageCue::new(crate::constants::CAKE_VIBRATE_AT_MS, AnimationStage::Vibrating),
    StageCue::new(crate::constants::CAKE_EXPLODE_AT_MS, AnimationStage::Exploded),
    StageCue::new(crate::constants::CAKE_COMPLETE_AT_MS, AnimationStage::Complete),
];

/// Cues must walk the stages forward with strictly increasing offsets and
/// end on `Complete`.
pub fn validate_cues(cues: &[StageCue]) -> Result<(), ConfigError> {
    let mut prev: Option<StageCue> = None;
    for cue in cues {
        if cue.stage == AnimationStage::Idle {
            return Err(ConfigError::invalid("cake cues cannot target idle"));
        }
        if let Some(p) = prev {
            if cue.offset_ms <= p.offset_ms || cue.stage <= p.stage {
                return Err(ConfigError::invalid(format!(
                    "cake cue {} at {}ms does not follow {} at {}ms",
                    cue.stage.as_str(),
                    cue.offset_ms,
                    p.stage.as_str(),
                    p.offset_ms
                )));
            }
        }
        prev = Some(*cue);
    }
    match prev {
        Some(last) if last.stage == AnimationStage::Complete => Ok(()),
        _ => Err(ConfigError::invalid("cake cues must end on complete")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    StageEntered(AnimationStage),
    /// Emitted once per activation, together with entering `Complete`.
    Completed,
}

#[derive(Debug)]
pub struct AnimationSequencer {
    cues: SmallVec<[StageCue; 3]>,
    stage: AnimationStage,
    timers: TimerQueue<AnimationStage>,
    pending: SmallVec<[TimerId; 3]>,
    activated_at: Option<Millis>,
    completed: bool,
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new(&CAKE_CUES)
    }
}

impl AnimationSequencer {
    /// `cues` are expected to pass [`validate_cues`].
    pub fn new(cues: &[StageCue]) -> Self {
        Self {
            cues: cues.iter().copied().collect(),
            stage: AnimationStage::Idle,
            timers: TimerQueue::new(),
            pending: SmallVec::new(),
            activated_at: None,
            completed: false,
        }
    }

    /// Starts the sequence. Refused while a previous activation has not been
    /// deactivated, including one that already completed.
    pub fn activate(&mut self, now: Millis) -> bool {
        if self.activated_at.is_some() {
            log::debug!("[cake] activate ignored; sequence already active");
            return false;
        }
        self.activated_at = Some(now);
        self.completed = false;
        self.stage = AnimationStage::Idle;
        for cue in &self.cues {
            let id = self.timers.schedule(now + cue.offset_ms, cue.stage);
            self.pending.push(id);
        }
        log::info!("[cake] sequence activated at {}ms", now);
        true
    }

    /// Cancels every outstanding cue and returns to `Idle` without emitting
    /// anything.
    pub fn deactivate(&mut self) {
        for id in self.pending.drain(..) {
            self.timers.cancel(id);
        }
        self.timers.clear();
        if self.activated_at.take().is_some() {
            log::info!("[cake] sequence deactivated in stage {}", self.stage.as_str());
        }
        self.stage = AnimationStage::Idle;
        self.completed = false;
    }

    pub fn advance(&mut self, now: Millis, out: &mut Vec<SequencerEvent>) {
        while let Some((_, stage)) = self.timers.pop_due(now) {
            self.pending.retain(|id| self.timers.is_pending(*id));
            self.stage = stage;
            out.push(SequencerEvent::StageEntered(stage));
            log::info!("[cake] stage -> {}", stage.as_str());
            if stage == AnimationStage::Complete && !self.completed {
                self.completed = true;
                out.push(SequencerEvent::Completed);
            }
        }
    }

    pub fn stage(&self) -> AnimationStage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn activated_at(&self) -> Option<Millis> {
        self.activated_at
    }

    /// Number of cues still waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn cues(&self) -> &[StageCue] {
        &self.cues
    }
}
