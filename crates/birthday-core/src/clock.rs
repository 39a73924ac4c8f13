//! Clock sources and the timer queue every component schedules against.
//!
//! Components never sleep or register host callbacks. They record absolute
//! deadlines in a [`TimerQueue`] and are advanced with a clock reading; the
//! host decides whether that reading comes from a wall clock or from a
//! [`ManualClock`] in a test.

use instant::Instant;
use std::cell::Cell;
use std::collections::BinaryHeap;
use std::cmp::Reverse;

/// Milliseconds on a single monotonic clock.
pub type Millis = u64;

pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Virtual clock moved by hand. Never goes backwards.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, delta: Millis) -> Millis {
        let next = self.now.get().saturating_add(delta);
        self.now.set(next);
        next
    }

    pub fn set(&self, at: Millis) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed since construction, backed by `instant::Instant`
/// (`performance.now()` on the web, `std::time::Instant` elsewhere).
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    at: Millis,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// Deadline-ordered queue of one-shot timers.
///
/// Timers fire in deadline order; equal deadlines fire in the order they
/// were scheduled. Cancellation is lazy: a cancelled entry stays in the heap
/// until it reaches the front and is then discarded.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    live: fnv::FnvHashSet<u64>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: fnv::FnvHashSet::default(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Millis, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(seq);
        self.heap.push(Reverse(Entry { at, seq, payload }));
        TimerId(seq)
    }

    /// Returns false when the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id.0)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id.0)
    }

    /// Pops the earliest live timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, T)> {
        loop {
            let front = self.heap.peek()?;
            if !self.live.contains(&front.0.seq) {
                self.heap.pop();
                continue;
            }
            if front.0.at > now {
                return None;
            }
            let Reverse(entry) = self.heap.pop()?;
            self.live.remove(&entry.seq);
            return Some((entry.at, entry.payload));
        }
    }

    pub fn next_deadline(&mut self) -> Option<Millis> {
        while let Some(front) = self.heap.peek() {
            if self.live.contains(&front.0.seq) {
                return Some(front.0.at);
            }
            self.heap.pop();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }
}
