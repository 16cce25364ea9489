//! Countdown for a single phase.
//!
//! Counts whole ticks, not wall-clock time. Each call to [`Countdown::tick`]
//! is treated as exactly one elapsed second, so delayed or dropped ticks
//! from the host are never caught up.

use serde::{Deserialize, Serialize};

/// Result of a tick that was actually consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown moved and still has time left.
    Counting,
    /// The countdown reached zero on this tick.
    PhaseExpired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u64,
    paused: bool,
}

impl Countdown {
    pub fn new(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            paused: false,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns `None` while paused. A tick on a countdown that is already
    /// at zero reports expiry instead of stalling.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.paused {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            Some(TickOutcome::PhaseExpired)
        } else {
            Some(TickOutcome::Counting)
        }
    }

    /// Load the duration of a new phase. Paused state is kept.
    pub fn reset_to(&mut self, secs: u64) {
        self.remaining_secs = secs;
    }

    /// Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Returns true if the state changed.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut c = Countdown::new(3);
        assert_eq!(c.tick(), Some(TickOutcome::Counting));
        assert_eq!(c.remaining_secs(), 2);
        assert_eq!(c.tick(), Some(TickOutcome::Counting));
        assert_eq!(c.remaining_secs(), 1);
        assert_eq!(c.tick(), Some(TickOutcome::PhaseExpired));
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn zero_duration_expires_on_next_tick() {
        let mut c = Countdown::new(0);
        assert_eq!(c.tick(), Some(TickOutcome::PhaseExpired));
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn paused_ticks_are_ignored() {
        let mut c = Countdown::new(5);
        assert!(c.pause());
        assert_eq!(c.tick(), None);
        assert_eq!(c.tick(), None);
        assert_eq!(c.remaining_secs(), 5);
        assert!(c.resume());
        assert_eq!(c.tick(), Some(TickOutcome::Counting));
        assert_eq!(c.remaining_secs(), 4);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut c = Countdown::new(5);
        assert!(!c.resume());
        assert!(c.pause());
        assert!(!c.pause());
        assert!(c.is_paused());
        assert!(c.resume());
        assert!(!c.resume());
        assert_eq!(c.remaining_secs(), 5);
    }

    #[test]
    fn reset_loads_new_phase() {
        let mut c = Countdown::new(1);
        assert_eq!(c.tick(), Some(TickOutcome::PhaseExpired));
        c.reset_to(10);
        assert_eq!(c.remaining_secs(), 10);
        assert_eq!(c.tick(), Some(TickOutcome::Counting));
    }
}
