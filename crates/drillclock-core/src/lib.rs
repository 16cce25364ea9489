//! # drillclock Core Library
//!
//! This library provides the interval engine behind the academy workout
//! timer: an exercise/rest countdown cycle that a host drives with one tick
//! per second and a handful of user actions. The `drillclock` CLI is a thin
//! terminal host over the same library.
//!
//! ## Architecture
//!
//! - **Workout Run**: a tick-driven state machine with no internal thread;
//!   the caller invokes `tick()` once per second
//! - **Events**: every state change produces a serializable [`Event`],
//!   returned from each command and delivered to subscribers
//! - **Storage**: TOML configuration and TOML/JSON workout files
//!
//! ## Key Components
//!
//! - [`WorkoutRun`]: run façade (start, tick, pause, resume, skip, previous, exit)
//! - [`Sequencer`]: exercise/rest transition rules
//! - [`Countdown`]: per-phase countdown
//! - [`SessionAggregate`]: elapsed time and completed exercises
//! - [`Ticker`]: async one-second tick source
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod workout;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::{load_workout, Config};
pub use workout::{
    builtin_workouts, find_workout, Countdown, Exercise, Phase, RunOptions, RunSnapshot,
    RunStatus, RunSummary, Sequencer, SequencerState, SessionAggregate, Ticker, Workout,
    WorkoutRun,
};
