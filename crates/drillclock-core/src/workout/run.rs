//! Workout run: the host-facing state machine.
//!
//! A run owns one [`Countdown`], one [`Sequencer`] and one
//! [`SessionAggregate`]. It has no internal thread; the host calls
//! [`WorkoutRun::tick`] once per second and forwards user actions.
//!
//! ## State Transitions
//!
//! ```text
//! Ready -> (CountingIn) -> Working <-> Resting -> Complete
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut run = WorkoutRun::new(workout, RunOptions::default())?;
//! run.subscribe(|event| println!("{event:?}"));
//! run.start();
//! // Once per second:
//! run.tick();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::SessionAggregate;
use super::countdown::{Countdown, TickOutcome};
use super::plan::Workout;
use super::sequencer::{Next, Phase, Sequencer, SequencerState};
use crate::error::Result;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created but not started.
    Ready,
    /// Lead-in countdown before the first exercise.
    CountingIn,
    Working,
    Resting,
    Complete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Seconds of 3-2-1 style countdown before `WORKING(0)`. 0 disables it.
    #[serde(default)]
    pub lead_in_secs: u64,
}

/// Read-only view of a run for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id: Uuid,
    pub workout_name: String,
    pub status: RunStatus,
    pub exercise_index: Option<usize>,
    pub exercise_name: Option<String>,
    pub exercise_count: usize,
    pub remaining_secs: u64,
    pub phase_total_secs: u64,
    pub elapsed_secs: u64,
    pub completed_count: usize,
    pub is_running: bool,
    pub is_paused: bool,
    pub is_complete: bool,
    /// 0.0 .. 1.0 within the current phase.
    pub step_progress: f64,
    /// 0.0 .. 100.0 across the planned workout.
    pub workout_progress_pct: f64,
}

/// Outcome of a run, produced on completion or exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub workout_name: String,
    pub exercise_count: usize,
    pub completed_count: usize,
    pub elapsed_secs: u64,
    pub completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Event) + Send>;

pub struct WorkoutRun {
    id: Uuid,
    workout: Workout,
    options: RunOptions,
    sequencer: Sequencer,
    countdown: Countdown,
    aggregate: SessionAggregate,
    started: bool,
    counting_in: bool,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl WorkoutRun {
    /// Validate the workout and prepare a run in the `Ready` state.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the workout is empty or any exercise
    /// has a blank name or a zero-length working phase.
    pub fn new(workout: Workout, options: RunOptions) -> Result<Self> {
        if let Err(err) = workout.validate() {
            tracing::warn!(workout = %workout.name, error = %err, "rejected workout");
            return Err(err.into());
        }
        let aggregate = SessionAggregate::new(workout.len());
        Ok(Self {
            id: Uuid::new_v4(),
            workout,
            options,
            sequencer: Sequencer::new(),
            countdown: Countdown::default(),
            aggregate,
            started: false,
            counting_in: false,
            started_at: None,
            finished_at: None,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn status(&self) -> RunStatus {
        if !self.started {
            return RunStatus::Ready;
        }
        if self.counting_in {
            return RunStatus::CountingIn;
        }
        match self.sequencer.phase() {
            Some(Phase::Working) => RunStatus::Working,
            Some(Phase::Resting) => RunStatus::Resting,
            None => RunStatus::Complete,
        }
    }

    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.aggregate.total_elapsed_secs()
    }

    pub fn completed_exercise_count(&self) -> usize {
        self.aggregate.completed_exercise_count()
    }

    /// Started and not yet complete.
    pub fn is_running(&self) -> bool {
        self.started && !self.aggregate.is_complete()
    }

    pub fn is_paused(&self) -> bool {
        self.is_running() && self.countdown.is_paused()
    }

    pub fn is_complete(&self) -> bool {
        self.aggregate.is_complete()
    }

    /// Planned length of whatever the countdown is currently timing.
    pub fn phase_total_secs(&self) -> u64 {
        if self.counting_in {
            self.options.lead_in_secs
        } else {
            self.sequencer.phase_duration_secs(&self.workout)
        }
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn step_progress(&self) -> f64 {
        let total = self.phase_total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs() as f64 / total as f64)
    }

    /// 0.0 .. 100.0 progress across the planned workout.
    pub fn workout_progress_pct(&self) -> f64 {
        let total = self.workout.total_duration_secs() as f64;
        if total == 0.0 {
            return 0.0;
        }
        match self.status() {
            RunStatus::Ready | RunStatus::CountingIn => 0.0,
            RunStatus::Complete => 100.0,
            RunStatus::Working | RunStatus::Resting => {
                let index = self.sequencer.index().unwrap_or(0);
                let mut done = self.workout.cumulative_secs(index);
                if self.status() == RunStatus::Resting {
                    let work = self.workout.get(index).map(|e| e.work_secs).unwrap_or(0);
                    done = done.saturating_add(work);
                }
                let phase_elapsed = self.phase_total_secs().saturating_sub(self.remaining_secs());
                (done.saturating_add(phase_elapsed) as f64 / total * 100.0).min(100.0)
            }
        }
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let exercise_index = self.sequencer.index();
        RunSnapshot {
            run_id: self.id,
            workout_name: self.workout.name.clone(),
            status: self.status(),
            exercise_index,
            exercise_name: exercise_index
                .and_then(|i| self.workout.get(i))
                .map(|e| e.name.clone()),
            exercise_count: self.workout.len(),
            remaining_secs: self.remaining_secs(),
            phase_total_secs: self.phase_total_secs(),
            elapsed_secs: self.elapsed_secs(),
            completed_count: self.completed_exercise_count(),
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            is_complete: self.is_complete(),
            step_progress: self.step_progress(),
            workout_progress_pct: self.workout_progress_pct(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.id,
            workout_name: self.workout.name.clone(),
            exercise_count: self.workout.len(),
            completed_count: self.completed_exercise_count(),
            elapsed_secs: self.elapsed_secs(),
            completed: self.is_complete(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a callback invoked with every event, in order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Event) + Send + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the run. No-op if already started.
    pub fn start(&mut self) -> Vec<Event> {
        if self.started {
            return Vec::new();
        }
        let now = Utc::now();
        self.started = true;
        self.started_at = Some(now);

        let mut events = vec![Event::RunStarted {
            run_id: self.id,
            workout_name: self.workout.name.clone(),
            exercise_count: self.workout.len(),
            lead_in_secs: self.options.lead_in_secs,
            at: now,
        }];
        tracing::info!(
            run_id = %self.id,
            workout = %self.workout.name,
            exercises = self.workout.len(),
            "run started"
        );

        if self.options.lead_in_secs > 0 {
            self.counting_in = true;
            self.countdown.reset_to(self.options.lead_in_secs);
        } else {
            self.enter_first_exercise(&mut events);
        }
        self.dispatch(events)
    }

    /// Consume one tick. Ignored before start, while paused and after
    /// completion.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        let Some(outcome) = self.countdown.tick() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if self.counting_in {
            events.push(self.tick_event(RunStatus::CountingIn));
            if outcome == TickOutcome::PhaseExpired {
                self.counting_in = false;
                self.enter_first_exercise(&mut events);
            }
        } else {
            self.aggregate.on_tick();
            events.push(self.tick_event(self.status()));
            if outcome == TickOutcome::PhaseExpired {
                self.advance(&mut events);
            }
        }
        self.dispatch(events)
    }

    pub fn pause(&mut self) -> Vec<Event> {
        if !self.is_running() || !self.countdown.pause() {
            return Vec::new();
        }
        tracing::debug!(run_id = %self.id, remaining = self.remaining_secs(), "paused");
        let event = Event::Paused {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        };
        self.dispatch(vec![event])
    }

    pub fn resume(&mut self) -> Vec<Event> {
        if !self.is_running() || !self.countdown.resume() {
            return Vec::new();
        }
        tracing::debug!(run_id = %self.id, remaining = self.remaining_secs(), "resumed");
        let event = Event::Resumed {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        };
        self.dispatch(vec![event])
    }

    /// End the current phase early. Takes the same transition as expiry,
    /// so a skipped working phase still counts as completed.
    pub fn skip(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        let status = self.status();
        let mut events = vec![Event::PhaseSkipped {
            status,
            exercise_index: self.sequencer.index().unwrap_or(0),
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        }];
        if self.counting_in {
            self.counting_in = false;
            self.enter_first_exercise(&mut events);
        } else {
            self.advance(&mut events);
        }
        self.dispatch(events)
    }

    /// Return to the previous exercise's working phase. No-op at the first
    /// exercise, during lead-in and after completion. The completed count
    /// is never decremented.
    pub fn previous(&mut self) -> Vec<Event> {
        if !self.is_running() || self.counting_in {
            return Vec::new();
        }
        let Some(from_index) = self.sequencer.index() else {
            return Vec::new();
        };
        let Some((to_index, duration_secs)) = self.sequencer.previous(&self.workout) else {
            return Vec::new();
        };
        self.countdown.reset_to(duration_secs);
        tracing::debug!(run_id = %self.id, from_index, to_index, "moved back");

        let now = Utc::now();
        let mut events = vec![Event::MovedBack {
            from_index,
            to_index,
            at: now,
        }];
        events.push(self.phase_started(to_index, Phase::Working, duration_secs));
        self.dispatch(events)
    }

    /// Stop the run and discard it.
    pub fn exit(mut self) -> RunSummary {
        let now = Utc::now();
        if self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
        let event = Event::RunExited {
            exercise_index: self.sequencer.index(),
            completed_count: self.completed_exercise_count(),
            elapsed_secs: self.elapsed_secs(),
            at: now,
        };
        tracing::info!(
            run_id = %self.id,
            completed = self.completed_exercise_count(),
            elapsed = self.elapsed_secs(),
            "run exited"
        );
        self.dispatch(vec![event]);
        self.summary()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_first_exercise(&mut self, events: &mut Vec<Event>) {
        let duration_secs = self.sequencer.phase_duration_secs(&self.workout);
        self.countdown.reset_to(duration_secs);
        events.push(self.phase_started(0, Phase::Working, duration_secs));
    }

    fn advance(&mut self, events: &mut Vec<Event>) {
        let Some(advance) = self.sequencer.advance(&self.workout) else {
            return;
        };

        if let Some(index) = advance.completed_exercise {
            if self.aggregate.on_exercise_completed(index) {
                events.push(Event::ExerciseCompleted {
                    exercise_index: index,
                    exercise_name: self.exercise_name(index),
                    completed_count: self.aggregate.completed_exercise_count(),
                    at: Utc::now(),
                });
            }
        }

        match advance.next {
            Next::Phase {
                index,
                phase,
                duration_secs,
            } => {
                self.countdown.reset_to(duration_secs);
                tracing::debug!(run_id = %self.id, index, ?phase, duration_secs, "phase started");
                events.push(self.phase_started(index, phase, duration_secs));
            }
            Next::Complete => {
                self.countdown.reset_to(0);
                self.aggregate.on_sequence_complete();
                let now = Utc::now();
                self.finished_at = Some(now);
                tracing::info!(
                    run_id = %self.id,
                    completed = self.aggregate.completed_exercise_count(),
                    elapsed = self.aggregate.total_elapsed_secs(),
                    "workout completed"
                );
                events.push(Event::WorkoutCompleted {
                    completed_count: self.aggregate.completed_exercise_count(),
                    elapsed_secs: self.aggregate.total_elapsed_secs(),
                    at: now,
                });
            }
        }
    }

    fn phase_started(&self, index: usize, phase: Phase, duration_secs: u64) -> Event {
        Event::PhaseStarted {
            exercise_index: index,
            exercise_name: self.exercise_name(index),
            phase,
            duration_secs,
            at: Utc::now(),
        }
    }

    fn tick_event(&self, status: RunStatus) -> Event {
        Event::Tick {
            status,
            exercise_index: self.sequencer.index().unwrap_or(0),
            remaining_secs: self.remaining_secs(),
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        }
    }

    fn exercise_name(&self, index: usize) -> String {
        self.workout
            .get(index)
            .map(|e| e.name.clone())
            .unwrap_or_default()
    }

    fn dispatch(&mut self, events: Vec<Event>) -> Vec<Event> {
        for event in &events {
            for (_, listener) in self.listeners.iter_mut() {
                listener(event);
            }
        }
        events
    }
}

impl std::fmt::Debug for WorkoutRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutRun")
            .field("id", &self.id)
            .field("workout", &self.workout.name)
            .field("status", &self.status())
            .field("sequencer", &self.sequencer)
            .field("countdown", &self.countdown)
            .field("aggregate", &self.aggregate)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::workout::plan::Exercise;

    fn two_step() -> Workout {
        Workout::new(
            "Scenario",
            vec![Exercise::new("A", 3, 2), Exercise::new("B", 2, 0)],
        )
    }

    fn started(workout: Workout) -> WorkoutRun {
        let mut run = WorkoutRun::new(workout, RunOptions::default()).unwrap();
        run.start();
        run
    }

    fn position(run: &WorkoutRun) -> (RunStatus, Option<usize>, u64) {
        (run.status(), run.sequencer.index(), run.remaining_secs())
    }

    #[test]
    fn scenario_walks_every_phase() {
        let mut run = started(two_step());
        assert_eq!(position(&run), (RunStatus::Working, Some(0), 3));

        let expected = [
            (RunStatus::Working, Some(0), 2),
            (RunStatus::Working, Some(0), 1),
            (RunStatus::Resting, Some(0), 2),
            (RunStatus::Resting, Some(0), 1),
            (RunStatus::Working, Some(1), 2),
            (RunStatus::Working, Some(1), 1),
            (RunStatus::Complete, None, 0),
        ];
        for want in expected {
            run.tick();
            assert_eq!(position(&run), want);
        }
        assert_eq!(run.completed_exercise_count(), 2);
        assert_eq!(run.elapsed_secs(), 7);
        assert!(run.is_complete());
        assert!(!run.is_running());
    }

    #[test]
    fn new_rejects_empty_workout() {
        let result = WorkoutRun::new(Workout::new("Empty", vec![]), RunOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut run = WorkoutRun::new(two_step(), RunOptions::default()).unwrap();
        assert_eq!(run.status(), RunStatus::Ready);
        assert!(run.tick().is_empty());
        assert!(run.pause().is_empty());
        assert!(!run.is_paused());
        assert!(run.skip().is_empty());
        assert_eq!(run.elapsed_secs(), 0);
    }

    #[test]
    fn start_twice_is_noop() {
        let mut run = started(two_step());
        assert!(run.start().is_empty());
    }

    #[test]
    fn paused_ticks_change_nothing() {
        let mut run = started(two_step());
        run.tick();
        assert_eq!(run.pause().len(), 1);
        assert!(run.pause().is_empty());
        for _ in 0..5 {
            assert!(run.tick().is_empty());
        }
        assert_eq!(run.remaining_secs(), 2);
        assert_eq!(run.elapsed_secs(), 1);
        assert!(run.is_paused());

        assert_eq!(run.resume().len(), 1);
        assert!(run.resume().is_empty());
        run.tick();
        assert_eq!(run.remaining_secs(), 1);
        assert_eq!(run.elapsed_secs(), 2);
    }

    #[test]
    fn skip_counts_the_exercise() {
        let mut run = started(two_step());
        let events = run.skip();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExerciseCompleted { exercise_index: 0, .. })));
        assert_eq!(position(&run), (RunStatus::Resting, Some(0), 2));
        assert_eq!(run.completed_exercise_count(), 1);
        assert_eq!(run.elapsed_secs(), 0);
    }

    #[test]
    fn skip_in_final_rest_completes() {
        let w = Workout::new("W", vec![Exercise::new("A", 2, 5)]);
        let mut run = started(w);
        run.skip();
        assert_eq!(run.status(), RunStatus::Resting);
        let events = run.skip();
        assert!(matches!(events.last(), Some(Event::WorkoutCompleted { .. })));
        assert!(run.is_complete());
    }

    #[test]
    fn previous_at_start_leaves_state_unchanged() {
        let mut run = started(two_step());
        run.tick();
        let before = run.snapshot();
        assert!(run.previous().is_empty());
        assert_eq!(run.snapshot(), before);
    }

    #[test]
    fn previous_does_not_double_count() {
        let mut run = started(two_step());
        run.skip();
        run.skip();
        assert_eq!(run.sequencer.index(), Some(1));
        run.previous();
        assert_eq!(position(&run), (RunStatus::Working, Some(0), 3));
        assert_eq!(run.completed_exercise_count(), 1);

        run.skip();
        assert_eq!(run.completed_exercise_count(), 1);
        run.skip();
        run.skip();
        assert!(run.is_complete());
        assert_eq!(run.completed_exercise_count(), 2);
    }

    #[test]
    fn actions_after_completion_are_ignored() {
        let mut run = started(Workout::new("W", vec![Exercise::new("A", 1, 0)]));
        run.tick();
        assert!(run.is_complete());
        assert!(run.tick().is_empty());
        assert!(run.pause().is_empty());
        assert!(run.resume().is_empty());
        assert!(run.skip().is_empty());
        assert!(run.previous().is_empty());
        assert_eq!(run.elapsed_secs(), 1);
    }

    #[test]
    fn lead_in_is_not_charged_to_elapsed() {
        let mut run = WorkoutRun::new(two_step(), RunOptions { lead_in_secs: 3 }).unwrap();
        run.start();
        assert_eq!(run.status(), RunStatus::CountingIn);
        assert_eq!(run.remaining_secs(), 3);
        run.tick();
        run.tick();
        assert!(run.previous().is_empty());
        let events = run.tick();
        assert!(matches!(
            events.last(),
            Some(Event::PhaseStarted { exercise_index: 0, phase: Phase::Working, .. })
        ));
        assert_eq!(position(&run), (RunStatus::Working, Some(0), 3));
        assert_eq!(run.elapsed_secs(), 0);
    }

    #[test]
    fn skip_during_lead_in_starts_first_exercise() {
        let mut run = WorkoutRun::new(two_step(), RunOptions { lead_in_secs: 3 }).unwrap();
        run.start();
        run.skip();
        assert_eq!(position(&run), (RunStatus::Working, Some(0), 3));
        assert_eq!(run.completed_exercise_count(), 0);
    }

    #[test]
    fn subscribers_see_every_event_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut run = WorkoutRun::new(two_step(), RunOptions::default()).unwrap();
        let sink = Arc::clone(&seen);
        let id = run.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let mut returned = run.start();
        returned.extend(run.tick());
        assert_eq!(*seen.lock().unwrap(), returned);

        assert!(run.unsubscribe(id));
        assert!(!run.unsubscribe(id));
        run.tick();
        assert_eq!(seen.lock().unwrap().len(), returned.len());
    }

    #[test]
    fn exit_reports_partial_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut run = started(two_step());
        let sink = Arc::clone(&seen);
        run.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        run.tick();
        run.skip();

        let summary = run.exit();
        assert!(!summary.completed);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.elapsed_secs, 1);
        assert!(summary.finished_at.is_some());
        assert!(matches!(
            seen.lock().unwrap().last(),
            Some(Event::RunExited { .. })
        ));
    }

    #[test]
    fn progress_tracks_position() {
        let mut run = started(two_step());
        assert_eq!(run.workout_progress_pct(), 0.0);
        run.tick();
        assert!((run.step_progress() - 1.0 / 3.0).abs() < 1e-9);
        run.skip();
        // Resting after A: 3 of 7 planned seconds done.
        assert!((run.workout_progress_pct() - 3.0 / 7.0 * 100.0).abs() < 1e-9);
        run.skip();
        run.skip();
        assert_eq!(run.workout_progress_pct(), 100.0);
    }
}
