//! Easter egg triggers (sequence matcher and repeat-press counter)

use std::time::{Duration, Instant};

/// Matches a fixed input sequence, one observation at a time.
///
/// A matching input advances the cursor; a mismatch resets it and then
/// re-evaluates the same input against the start of the sequence, so a
/// stray prefix never eats the first element of a fresh attempt. Completing
/// the sequence fires exactly once and resets.
pub struct SequenceMatcher<T> {
    expected: Vec<T>,
    cursor: usize,
}

impl<T: PartialEq> SequenceMatcher<T> {
    pub fn new(expected: Vec<T>) -> Self {
        Self { expected, cursor: 0 }
    }

    pub fn observe(&mut self, input: &T) -> bool {
        if self.expected.is_empty() {
            return false;
        }
        if *input == self.expected[self.cursor] {
            self.cursor += 1;
        } else {
            self.cursor = if *input == self.expected[0] { 1 } else { 0 };
        }
        if self.cursor == self.expected.len() {
            self.cursor = 0;
            return true;
        }
        false
    }
}

/// Counts rapid repeat presses, resetting after an idle period.
///
/// Fires once when the threshold is reached, then starts over. The idle
/// reset runs off the event loop through `tick`.
pub struct RepeatCounter {
    threshold: u32,
    reset_delay: Duration,
    count: u32,
    last_press: Option<Instant>,
}

impl RepeatCounter {
    pub fn new(threshold: u32, reset_delay: Duration) -> Self {
        Self {
            threshold,
            reset_delay,
            count: 0,
            last_press: None,
        }
    }

    pub fn press(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_press {
            if now.duration_since(last) >= self.reset_delay {
                self.count = 0;
            }
        }
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            self.last_press = None;
            return true;
        }
        self.last_press = Some(now);
        false
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_press {
            if now.duration_since(last) >= self.reset_delay {
                self.count = 0;
                self.last_press = None;
            }
        }
    }
}
