//! Composition of the greeting page.
//!
//! [`Greeting`] owns every component, reads the clock once per [`tick`]
//! and turns user gestures into component calls. Components never see each
//! other; anything the page has to redraw comes out of [`drain_events`] or
//! the element registry's change list.
//!
//! [`tick`]: Greeting::tick
//! [`drain_events`]: Greeting::drain_events

use crate::audio::{play_now, AudioBackend, AudioOutput};
use crate::clock::{Clock, Millis};
use crate::config::GreetingConfig;
use crate::confetti::{ConfettiLoop, ConfettiShot};
use crate::constants::AUDIO_LEAD_SEC;
use crate::cutter::CakeCutter;
use crate::emitter::{ElementKind, ElementRegistry, Emitter};
use crate::error::{Result, WishError};
use crate::player::{StartOutcome, ToneScheduler};
use crate::sequencer::{AnimationSequencer, AnimationStage, SequencerEvent};
use crate::tone::{explosion_event, HAPPY_BIRTHDAY};
use crate::wishes::{WishId, WishList};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    CardShown,
    CardHidden,
    MusicChanged(bool),
    CakeActivated,
    StageChanged(AnimationStage),
    CakeCompleted,
    CakeReset,
    WishSubmitting,
    WishAdded(WishId),
    SlicesChanged(u32),
    CutFinished,
}

fn mix_seed(seed: u64, lane: u64) -> u64 {
    seed ^ lane.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub struct Greeting<C: Clock, B: AudioBackend> {
    clock: C,
    backend: B,
    config: GreetingConfig,
    tune: ToneScheduler<B::Output>,
    cake: AnimationSequencer,
    cutter: CakeCutter,
    confetti: ConfettiLoop,
    particles: Emitter,
    bubbles: Emitter,
    registry: ElementRegistry,
    wishes: WishList,
    explosion_audio: Option<B::Output>,
    surprised: bool,
    card_visible: bool,
    mounted: bool,
    events: Vec<ShellEvent>,
    cake_events: Vec<SequencerEvent>,
    shots: Vec<ConfettiShot>,
}

impl<C: Clock, B: AudioBackend> Greeting<C, B> {
    pub fn new(clock: C, backend: B) -> Self {
        Self::build(clock, backend, GreetingConfig::default())
    }

    pub fn with_config(clock: C, backend: B, config: GreetingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(clock, backend, config))
    }

    fn build(clock: C, backend: B, config: GreetingConfig) -> Self {
        Self {
            tune: ToneScheduler::new(&HAPPY_BIRTHDAY, &config.tune),
            cake: AnimationSequencer::new(&config.cake.cues()),
            cutter: CakeCutter::new(),
            confetti: ConfettiLoop::new(&config.confetti, mix_seed(config.seed, 1)),
            particles: Emitter::new(config.particles, mix_seed(config.seed, 2)),
            bubbles: Emitter::new(config.bubbles, mix_seed(config.seed, 3)),
            registry: ElementRegistry::new(),
            wishes: WishList::new(&config.wishes),
            explosion_audio: None,
            surprised: false,
            card_visible: false,
            mounted: false,
            events: Vec::new(),
            cake_events: Vec::new(),
            shots: Vec::new(),
            clock,
            backend,
            config,
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        let now = self.now();
        self.mounted = true;
        self.particles.mount(now);
        self.bubbles.mount(now);
    }

    /// Tears everything down; no timer owned by any component survives.
    pub fn unmount(&mut self) {
        if self.tune.stop() {
            self.events.push(ShellEvent::MusicChanged(false));
        }
        if self.cake.is_active() {
            self.cake.deactivate();
            self.events.push(ShellEvent::CakeReset);
        }
        self.confetti.stop();
        self.particles.unmount();
        self.bubbles.unmount();
        if let Some(mut audio) = self.explosion_audio.take() {
            audio.close();
        }
        self.mounted = false;
    }

    /// The one-shot primary gesture: starts the tune and the confetti and
    /// reveals the wish card. Returns false when it already happened.
    pub fn click_surprise(&mut self) -> bool {
        if self.surprised {
            return false;
        }
        let now = self.now();
        self.surprised = true;
        self.card_visible = true;
        self.events.push(ShellEvent::CardShown);
        self.start_tune(now);
        self.confetti.start(now);
        log::info!("[shell] surprise activated at {}ms", now);
        true
    }

    fn start_tune(&mut self, now: Millis) {
        match self.tune.start(now, &mut self.backend) {
            StartOutcome::Started | StartOutcome::Silent => {
                self.events.push(ShellEvent::MusicChanged(true));
            }
            StartOutcome::AlreadyPlaying => {}
        }
    }

    /// Music control shown after the surprise. Returns the new playing state.
    pub fn toggle_music(&mut self) -> bool {
        if !self.surprised {
            return false;
        }
        if self.tune.is_playing() {
            self.tune.stop();
            self.events.push(ShellEvent::MusicChanged(false));
        } else {
            let now = self.now();
            self.start_tune(now);
        }
        self.tune.is_playing()
    }

    pub fn close_card(&mut self) {
        if self.card_visible {
            self.card_visible = false;
            self.events.push(ShellEvent::CardHidden);
        }
    }

    /// Starts the explosion when the cake is idle, resets a finished one and
    /// ignores clicks while the sequence is running.
    pub fn click_cake(&mut self) -> bool {
        if !self.cake.is_active() {
            let now = self.now();
            self.cake.activate(now);
            self.events.push(ShellEvent::CakeActivated);
            true
        } else if self.cake.is_complete() {
            self.cake.deactivate();
            self.events.push(ShellEvent::CakeReset);
            true
        } else {
            false
        }
    }

    pub fn cut_cake(&mut self) -> bool {
        let now = self.now();
        if self.cutter.cut(now) {
            self.events.push(ShellEvent::SlicesChanged(self.cutter.slices()));
            true
        } else {
            false
        }
    }

    pub fn submit_wish(&mut self, text: &str) -> std::result::Result<WishId, WishError> {
        let now = self.now();
        let id = self.wishes.submit(text, now)?;
        self.events.push(ShellEvent::WishSubmitting);
        Ok(id)
    }

    /// Advances every component to the current clock reading.
    pub fn tick(&mut self) {
        let now = self.now();

        if let Some(id) = self.wishes.advance(now) {
            self.events.push(ShellEvent::WishAdded(id));
        }
        if self.cutter.advance(now) {
            self.events.push(ShellEvent::CutFinished);
        }

        self.cake_events.clear();
        self.cake.advance(now, &mut self.cake_events);
        for i in 0..self.cake_events.len() {
            match self.cake_events[i] {
                SequencerEvent::StageEntered(stage) => {
                    if stage == AnimationStage::Exploded {
                        self.play_explosion();
                    }
                    self.events.push(ShellEvent::StageChanged(stage));
                }
                SequencerEvent::Completed => {
                    log::info!("[cake] explosion sequence complete");
                    self.events.push(ShellEvent::CakeCompleted);
                }
            }
        }

        self.tune.advance(now);

        self.shots.clear();
        self.confetti.advance(now, &mut self.shots);
        let lifetime = self.config.confetti.shot_lifetime_ms;
        for shot in &self.shots {
            self.registry.spawn(
                ElementKind::ConfettiBurst {
                    particles: shot.particles,
                },
                shot.origin,
                0.0,
                lifetime as f32 / 1000.0,
                now,
                lifetime,
            );
        }

        self.particles.advance(now, &mut self.registry);
        self.bubbles.advance(now, &mut self.registry);
        self.registry.sweep(now);
    }

    /// The explosion gets its own short-lived output; failing to open one
    /// leaves the visual sequence untouched.
    fn play_explosion(&mut self) {
        if let Some(mut previous) = self.explosion_audio.take() {
            previous.close();
        }
        match self.backend.open() {
            Ok(mut audio) => {
                play_now(&mut audio, explosion_event, AUDIO_LEAD_SEC);
                self.explosion_audio = Some(audio);
            }
            Err(e) => log::warn!("[cake] explosion sound skipped: {}", e),
        }
    }

    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn wishes(&self) -> &WishList {
        &self.wishes
    }

    pub fn stage(&self) -> AnimationStage {
        self.cake.stage()
    }

    pub fn cake(&self) -> &AnimationSequencer {
        &self.cake
    }

    pub fn tune(&self) -> &ToneScheduler<B::Output> {
        &self.tune
    }

    pub fn is_playing(&self) -> bool {
        self.tune.is_playing()
    }

    pub fn card_visible(&self) -> bool {
        self.card_visible
    }

    pub fn surprised(&self) -> bool {
        self.surprised
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn slices(&self) -> u32 {
        self.cutter.slices()
    }

    pub fn is_cutting(&self) -> bool {
        self.cutter.is_animating()
    }

    pub fn confetti_running(&self) -> bool {
        self.confetti.is_running()
    }

    pub fn config(&self) -> &GreetingConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
