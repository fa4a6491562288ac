//! Validate-on-type scheduling.
//!
//! Fields are validated once the user stops typing for a short while. The
//! caller reports keystrokes with [`Debouncer::touch`] and periodically asks
//! which fields are due with [`Debouncer::drain_due`]. Time is always passed
//! in, so the state machine is deterministic under test.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Delay between the last keystroke and validation.
pub const VALIDATION_DELAY: Duration = Duration::from_millis(900);

/// Pending validation deadlines, at most one per field.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: HashMap<String, Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    /// Creates a debouncer with the standard [`VALIDATION_DELAY`].
    pub fn new() -> Self {
        Self::with_delay(VALIDATION_DELAY)
    }

    /// Creates a debouncer with a custom delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// The configured delay.
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a keystroke on `field` at `now`, replacing any earlier
    /// deadline for it.
    pub fn touch(&mut self, field: &str, now: Instant) {
        let deadline = now + self.delay;
        match self.pending.get_mut(field) {
            Some(existing) => *existing = deadline,
            None => {
                self.pending.insert(field.to_string(), deadline);
            }
        }
    }

    /// Drops the pending deadline for `field`. Returns true if one existed.
    pub fn cancel(&mut self, field: &str) -> bool {
        self.pending.remove(field).is_some()
    }

    /// Check if `field` is waiting to be validated.
    #[inline]
    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.contains_key(field)
    }

    /// Number of fields waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, for scheduling the next wake-up.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Removes and returns every field whose deadline is at or before
    /// `now`, earliest deadline first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<(Instant, String)> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(field, &deadline)| (deadline, field.clone()))
            .collect();
        due.sort();

        for (_, field) in &due {
            self.pending.remove(field);
        }
        due.into_iter().map(|(_, field)| field).collect()
    }
}
