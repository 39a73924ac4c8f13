//! Decorative element spawning and the registry the renderer mirrors.

use crate::clock::{Millis, TimerId, TimerQueue};
use crate::constants::{BUBBLE_GLOWS, BUBBLE_QUOTES, PARTICLE_COLORS};
use crate::error::ConfigError;
use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitterKind {
    Particle,
    Bubble,
}

/// What an element looks like. Indices point into the palettes in
/// [`crate::constants`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Particle { color: usize, glow: usize },
    Bubble { quote: usize, glow: usize },
    ConfettiBurst { particles: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Fractions of the viewport; x runs left to right, y top to bottom.
    pub position: Vec2,
    pub delay_sec: f32,
    pub duration_sec: f32,
    pub spawned_at: Millis,
    pub expires_at: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryChange {
    Spawned(ElementId),
    Expired(ElementId),
}

/// The set of live decorative elements, keyed by generated id.
///
/// Rendering surfaces do not get mutated directly; they drain
/// [`RegistryChange`]s and look the elements up.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: FnvHashMap<ElementId, VisualElement>,
    changes: Vec<RegistryChange>,
    next_id: u64,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(
        &mut self,
        kind: ElementKind,
        position: Vec2,
        delay_sec: f32,
        duration_sec: f32,
        now: Millis,
        lifetime_ms: Millis,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            VisualElement {
                id,
                kind,
                position,
                delay_sec,
                duration_sec,
                spawned_at: now,
                expires_at: now.saturating_add(lifetime_ms),
            },
        );
        self.changes.push(RegistryChange::Spawned(id));
        id
    }

    /// Removes an element. Removing one that is already gone is a no-op.
    pub fn expire(&mut self, id: ElementId) -> bool {
        if self.elements.remove(&id).is_some() {
            self.changes.push(RegistryChange::Expired(id));
            true
        } else {
            false
        }
    }

    /// Expires every element whose lifetime has run out; returns how many.
    pub fn sweep(&mut self, now: Millis) -> usize {
        let mut due: Vec<ElementId> = self
            .elements
            .values()
            .filter(|e| e.expires_at <= now)
            .map(|e| e.id)
            .collect();
        due.sort();
        for id in &due {
            self.expire(*id);
        }
        due.len()
    }

    pub fn get(&self, id: ElementId) -> Option<&VisualElement> {
        self.elements.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.values()
    }

    pub fn count_where(&self, pred: impl Fn(&ElementKind) -> bool) -> usize {
        self.elements.values().filter(|e| pred(&e.kind)).count()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn drain_changes(&mut self) -> Vec<RegistryChange> {
        std::mem::take(&mut self.changes)
    }

    /// Drops every element, reporting each as expired.
    pub fn clear(&mut self) {
        let mut ids: Vec<ElementId> = self.elements.keys().copied().collect();
        ids.sort();
        for id in ids {
            self.expire(id);
        }
    }
}

/// Spawn cadence and per-element timing for one emitter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterSpec {
    pub kind: EmitterKind,
    pub initial_count: u32,
    pub initial_stagger_ms: Millis,
    pub interval_ms: Millis,
    pub lifetime_ms: Millis,
    pub delay_range_sec: [f32; 2],
    pub duration_range_sec: [f32; 2],
}

impl EmitterSpec {
    pub const PARTICLES: EmitterSpec = EmitterSpec {
        kind: EmitterKind::Particle,
        initial_count: 50,
        initial_stagger_ms: 300,
        interval_ms: 500,
        lifetime_ms: 15_000,
        delay_range_sec: [0.0, 15.0],
        duration_range_sec: [10.0, 20.0],
    };

    pub const BUBBLES: EmitterSpec = EmitterSpec {
        kind: EmitterKind::Bubble,
        initial_count: 3,
        initial_stagger_ms: 4_000,
        interval_ms: 6_000,
        lifetime_ms: 12_000,
        delay_range_sec: [0.0, 12.0],
        duration_range_sec: [10.0, 18.0],
    };

    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if self.interval_ms == 0 || self.lifetime_ms == 0 {
            return Err(ConfigError::invalid(format!(
                "{label}: interval_ms and lifetime_ms must be > 0"
            )));
        }
        let ordered = |r: [f32; 2]| r[0] >= 0.0 && r[0] <= r[1];
        if !ordered(self.delay_range_sec) || !ordered(self.duration_range_sec) {
            return Err(ConfigError::invalid(format!(
                "{label}: ranges must satisfy 0 <= min <= max"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpawnTimer {
    Initial,
    Steady,
}

/// Spawns elements into an [`ElementRegistry`]: a staggered opening burst,
/// then one element per interval until unmounted.
pub struct Emitter {
    spec: EmitterSpec,
    rng: StdRng,
    timers: TimerQueue<SpawnTimer>,
    steady: Option<TimerId>,
    mounted: bool,
    spawned: u64,
}

impl Emitter {
    pub fn new(spec: EmitterSpec, seed: u64) -> Self {
        Self {
            spec,
            rng: StdRng::seed_from_u64(seed),
            timers: TimerQueue::new(),
            steady: None,
            mounted: false,
            spawned: 0,
        }
    }

    pub fn mount(&mut self, now: Millis) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        for i in 0..self.spec.initial_count as Millis {
            self.timers
                .schedule(now + i * self.spec.initial_stagger_ms, SpawnTimer::Initial);
        }
        self.steady = Some(
            self.timers
                .schedule(now + self.spec.interval_ms, SpawnTimer::Steady),
        );
        log::info!(
            "[emitter] {:?} mounted: burst of {} then every {}ms",
            self.spec.kind,
            self.spec.initial_count,
            self.spec.interval_ms
        );
    }

    /// Stops spawning. Elements already in the registry live out their
    /// lifetime.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.steady = None;
        self.timers.clear();
        log::info!("[emitter] {:?} unmounted", self.spec.kind);
    }

    pub fn advance(&mut self, now: Millis, registry: &mut ElementRegistry) {
        while let Some((at, timer)) = self.timers.pop_due(now) {
            self.spawn_one(at, registry);
            if timer == SpawnTimer::Steady {
                self.steady = Some(
                    self.timers
                        .schedule(at + self.spec.interval_ms, SpawnTimer::Steady),
                );
            }
        }
    }

    fn spawn_one(&mut self, at: Millis, registry: &mut ElementRegistry) -> ElementId {
        let spec = self.spec;
        let x = self.rng.gen::<f32>();
        let delay = uniform(&mut self.rng, spec.delay_range_sec);
        let duration = uniform(&mut self.rng, spec.duration_range_sec);
        let (kind, position) = match spec.kind {
            EmitterKind::Particle => (
                ElementKind::Particle {
                    color: self.rng.gen_range(0..PARTICLE_COLORS.len()),
                    glow: self.rng.gen_range(0..PARTICLE_COLORS.len()),
                },
                Vec2::new(x, 1.0),
            ),
            EmitterKind::Bubble => (
                ElementKind::Bubble {
                    quote: self.rng.gen_range(0..BUBBLE_QUOTES.len()),
                    glow: self.rng.gen_range(0..BUBBLE_GLOWS.len()),
                },
                Vec2::new(x, 1.1),
            ),
        };
        self.spawned += 1;
        registry.spawn(kind, position, delay, duration, at, spec.lifetime_ms)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn has_steady_timer(&self) -> bool {
        self.steady
            .map(|id| self.timers.is_pending(id))
            .unwrap_or(false)
    }

    pub fn pending_spawns(&self) -> usize {
        self.timers.len()
    }

    pub fn spec(&self) -> &EmitterSpec {
        &self.spec
    }
}

#[inline]
fn uniform(rng: &mut StdRng, range: [f32; 2]) -> f32 {
    if range[1] > range[0] {
        rng.gen_range(range[0]..range[1])
    } else {
        range[0]
    }
}
