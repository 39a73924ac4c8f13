use crate::clock::{Millis, TimerQueue};
use crate::config::ConfettiConfig;
use glam::Vec2;
use rand::prelude::*;

/// One burst of confetti from `origin` (viewport fractions).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiShot {
    pub origin: Vec2,
    pub particles: u32,
}

/// Paired left/right bursts on a fixed interval, thinning out until the
/// loop's duration is used up.
pub struct ConfettiLoop {
    config: ConfettiConfig,
    rng: StdRng,
    timers: TimerQueue<()>,
    ends_at: Option<Millis>,
}

impl ConfettiLoop {
    pub fn new(config: &ConfettiConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            rng: StdRng::seed_from_u64(seed),
            timers: TimerQueue::new(),
            ends_at: None,
        }
    }

    pub fn start(&mut self, now: Millis) -> bool {
        if self.ends_at.is_some() {
            return false;
        }
        self.ends_at = Some(now + self.config.duration_ms);
        self.timers.schedule(now + self.config.interval_ms, ());
        log::info!("[confetti] burst loop for {}ms", self.config.duration_ms);
        true
    }

    pub fn stop(&mut self) {
        self.timers.clear();
        self.ends_at = None;
    }

    pub fn advance(&mut self, now: Millis, out: &mut Vec<ConfettiShot>) {
        while let Some((at, ())) = self.timers.pop_due(now) {
            let Some(ends_at) = self.ends_at else {
                return;
            };
            if at >= ends_at {
                log::debug!("[confetti] loop finished");
                self.stop();
                return;
            }
            let time_left = (ends_at - at) as f32;
            let particles =
                (self.config.base_particles * time_left / self.config.duration_ms as f32) as u32;
            let left = Vec2::new(self.rng.gen_range(0.1..0.3), self.rng.gen::<f32>() - 0.2);
            let right = Vec2::new(self.rng.gen_range(0.7..0.9), self.rng.gen::<f32>() - 0.2);
            out.push(ConfettiShot {
                origin: left,
                particles,
            });
            out.push(ConfettiShot {
                origin: right,
                particles,
            });
            self.timers.schedule(at + self.config.interval_ms, ());
        }
    }

    pub fn is_running(&self) -> bool {
        self.ends_at.is_some()
    }
}
