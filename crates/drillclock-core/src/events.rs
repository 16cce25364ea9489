use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workout::{Phase, RunStatus};

/// Every state change of a run produces an Event.
/// Hosts either read the events returned by each command or subscribe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        workout_name: String,
        exercise_count: usize,
        lead_in_secs: u64,
        at: DateTime<Utc>,
    },
    /// A tick was consumed. `remaining_secs` is the value after the tick.
    Tick {
        status: RunStatus,
        exercise_index: usize,
        remaining_secs: u64,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseStarted {
        exercise_index: usize,
        exercise_name: String,
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        exercise_index: usize,
        exercise_name: String,
        completed_count: usize,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseSkipped {
        status: RunStatus,
        exercise_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    MovedBack {
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        completed_count: usize,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    RunExited {
        exercise_index: Option<usize>,
        completed_count: usize,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
}
