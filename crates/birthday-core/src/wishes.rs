use crate::clock::Millis;
use crate::config::WishConfig;
use crate::error::WishError;
use std::collections::VecDeque;

/// Identity of a wish: the instant it was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WishId(pub Millis);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wish {
    pub id: WishId,
    pub message: String,
    pub timestamp: Millis,
}

/// Bounded, newest-first list of submitted wishes.
///
/// A submission waits out a short settling delay before it lands; while it
/// is pending, further submissions are refused.
#[derive(Debug)]
pub struct WishList {
    wishes: VecDeque<Wish>,
    pending: Option<(Millis, Wish)>,
    capacity: usize,
    latency_ms: Millis,
    max_chars: usize,
}

impl Default for WishList {
    fn default() -> Self {
        Self::new(&WishConfig::default())
    }
}

impl WishList {
    pub fn new(config: &WishConfig) -> Self {
        Self {
            wishes: VecDeque::with_capacity(config.capacity + 1),
            pending: None,
            capacity: config.capacity.max(1),
            latency_ms: config.latency_ms,
            max_chars: config.max_chars.max(1),
        }
    }

    pub fn submit(&mut self, text: &str, now: Millis) -> Result<WishId, WishError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WishError::Empty);
        }
        if self.pending.is_some() {
            return Err(WishError::Busy);
        }
        let message = match trimmed.char_indices().nth(self.max_chars) {
            Some((cut, _)) => trimmed[..cut].trim_end().to_string(),
            None => trimmed.to_string(),
        };
        let wish = Wish {
            id: WishId(now),
            message,
            timestamp: now,
        };
        let id = wish.id;
        self.pending = Some((now + self.latency_ms, wish));
        log::debug!("[wish] submitted {:?}, settles in {}ms", id, self.latency_ms);
        Ok(id)
    }

    /// Lands the pending wish once its delay has passed.
    pub fn advance(&mut self, now: Millis) -> Option<WishId> {
        match &self.pending {
            Some((due, _)) if *due <= now => {}
            _ => return None,
        }
        let (_, wish) = self.pending.take()?;
        let id = wish.id;
        self.wishes.push_front(wish);
        self.wishes.truncate(self.capacity);
        log::info!("[wish] added {:?}; {} on the board", id, self.wishes.len());
        Some(id)
    }

    /// Newest first.
    pub fn wishes(&self) -> impl Iterator<Item = &Wish> {
        self.wishes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Wish> {
        self.wishes.get(index)
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn len(&self) -> usize {
        self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
