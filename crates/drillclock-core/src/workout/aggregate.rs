use serde::{Deserialize, Serialize};

/// Run-wide totals derived from sequencer activity.
///
/// Completed exercises are tracked per index so an exercise revisited with
/// "previous" is never counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAggregate {
    total_elapsed_secs: u64,
    completed: Vec<bool>,
    is_complete: bool,
}

impl SessionAggregate {
    pub fn new(exercise_count: usize) -> Self {
        Self {
            total_elapsed_secs: 0,
            completed: vec![false; exercise_count],
            is_complete: false,
        }
    }

    pub fn total_elapsed_secs(&self) -> u64 {
        self.total_elapsed_secs
    }

    pub fn completed_exercise_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Charge one consumed tick. Frozen once complete.
    pub fn on_tick(&mut self) {
        if !self.is_complete {
            self.total_elapsed_secs += 1;
        }
    }

    /// Returns true the first time `index` is completed.
    pub fn on_exercise_completed(&mut self, index: usize) -> bool {
        if self.is_complete {
            return false;
        }
        match self.completed.get_mut(index) {
            Some(done) if !*done => {
                *done = true;
                true
            }
            _ => false,
        }
    }

    pub fn on_sequence_complete(&mut self) {
        self.is_complete = true;
    }
}
