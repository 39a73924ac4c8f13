use crate::clock::Millis;
use crate::constants::CUT_ANIMATION_MS;

/// "Cut the cake" counter. A cut plays a short animation; clicks during it
/// are ignored.
#[derive(Debug, Default)]
pub struct CakeCutter {
    slices: u32,
    animating_until: Option<Millis>,
}

impl CakeCutter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cut(&mut self, now: Millis) -> bool {
        if self.animating_until.is_some() {
            return false;
        }
        self.slices += 1;
        self.animating_until = Some(now + CUT_ANIMATION_MS);
        true
    }

    /// Returns true when the cut animation ended on this call.
    pub fn advance(&mut self, now: Millis) -> bool {
        match self.animating_until {
            Some(until) if until <= now => {
                self.animating_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn slices(&self) -> u32 {
        self.slices
    }

    pub fn is_animating(&self) -> bool {
        self.animating_until.is_some()
    }
}
