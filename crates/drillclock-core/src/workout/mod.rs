mod aggregate;
mod clock;
mod countdown;
mod library;
mod plan;
mod run;
mod sequencer;

pub use aggregate::SessionAggregate;
pub use clock::{Ticker, DEFAULT_TICK_INTERVAL};
pub use countdown::{Countdown, TickOutcome};
pub use library::{builtin_workouts, find_workout, workout_ids};
pub use plan::{Exercise, Workout};
pub use run::{ListenerId, RunOptions, RunSnapshot, RunStatus, RunSummary, WorkoutRun};
pub use sequencer::{Advance, Next, Phase, Sequencer, SequencerState};
