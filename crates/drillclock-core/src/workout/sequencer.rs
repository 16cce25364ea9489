//! Phase sequencer: the exercise/rest state machine.
//!
//! ```text
//! WORKING(i) --expire/skip--> RESTING(i)          if rest_secs[i] > 0
//! WORKING(i) --expire/skip--> WORKING(i+1)        if rest_secs[i] == 0
//! RESTING(i) --expire/skip--> WORKING(i+1)
//! last phase --expire/skip--> COMPLETE
//! WORKING(i) --previous-----> WORKING(i-1)        i > 0
//! RESTING(i) --previous-----> WORKING(i)
//! ```
//!
//! The sequencer never parks on a zero-length phase: a rest of 0 seconds is
//! passed through inside the same transition that ends the working phase.

use serde::{Deserialize, Serialize};

use super::plan::Workout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Working,
    Resting,
}

/// Where the sequencer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SequencerState {
    Active { index: usize, phase: Phase },
    Complete,
}

/// What a forward transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Set when the transition ended a working phase.
    pub completed_exercise: Option<usize>,
    pub next: Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Phase {
        index: usize,
        phase: Phase,
        duration_secs: u64,
    },
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequencer {
    state: SequencerState,
}

impl Sequencer {
    /// Starts at `WORKING(0)`.
    pub fn new() -> Self {
        Self {
            state: SequencerState::Active {
                index: 0,
                phase: Phase::Working,
            },
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SequencerState::Complete
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            SequencerState::Active { index, .. } => Some(index),
            SequencerState::Complete => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self.state {
            SequencerState::Active { phase, .. } => Some(phase),
            SequencerState::Complete => None,
        }
    }

    /// Planned length of the current phase.
    pub fn phase_duration_secs(&self, workout: &Workout) -> u64 {
        match self.state {
            SequencerState::Active { index, phase } => workout
                .get(index)
                .map(|e| match phase {
                    Phase::Working => e.work_secs,
                    Phase::Resting => e.rest_secs,
                })
                .unwrap_or(0),
            SequencerState::Complete => 0,
        }
    }

    /// Move past the current phase, whether it expired or was skipped.
    ///
    /// Returns `None` once complete.
    pub fn advance(&mut self, workout: &Workout) -> Option<Advance> {
        let SequencerState::Active { index, phase } = self.state else {
            return None;
        };
        let exercise = workout.get(index)?;

        let advance = match phase {
            Phase::Working if exercise.rest_secs > 0 => Advance {
                completed_exercise: Some(index),
                next: Next::Phase {
                    index,
                    phase: Phase::Resting,
                    duration_secs: exercise.rest_secs,
                },
            },
            Phase::Working => Advance {
                completed_exercise: Some(index),
                next: Self::work_after(workout, index),
            },
            Phase::Resting => Advance {
                completed_exercise: None,
                next: Self::work_after(workout, index),
            },
        };

        self.state = match advance.next {
            Next::Phase { index, phase, .. } => SequencerState::Active { index, phase },
            Next::Complete => SequencerState::Complete,
        };
        Some(advance)
    }

    /// Step back to a working phase. `None` at `WORKING(0)` or once complete.
    ///
    /// Returns the new index and its working duration.
    pub fn previous(&mut self, workout: &Workout) -> Option<(usize, u64)> {
        let SequencerState::Active { index, phase } = self.state else {
            return None;
        };
        let target = match phase {
            Phase::Resting => index,
            Phase::Working if index > 0 => index - 1,
            Phase::Working => return None,
        };
        let exercise = workout.get(target)?;
        self.state = SequencerState::Active {
            index: target,
            phase: Phase::Working,
        };
        Some((target, exercise.work_secs))
    }

    fn work_after(workout: &Workout, index: usize) -> Next {
        match workout.get(index + 1) {
            Some(next) => Next::Phase {
                index: index + 1,
                phase: Phase::Working,
                duration_secs: next.work_secs,
            },
            None => Next::Complete,
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
