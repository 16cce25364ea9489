use clap::Args;
use drillclock_core::{Config, Event, RunOptions, RunSummary, Workout, WorkoutRun};

use super::WorkoutSource;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: WorkoutSource,
    /// Skip every phase instead of ticking through it
    #[arg(long)]
    pub skip_all: bool,
    /// Lead-in seconds before the first exercise
    #[arg(long, default_value = "0")]
    pub lead_in: u64,
    /// Print every event as a JSON line before the summary
    #[arg(long)]
    pub events: bool,
}

/// Upper bound on commands needed to finish; guards against a stuck machine.
fn command_limit(workout: &Workout, options: RunOptions, skip_all: bool) -> u64 {
    if skip_all {
        (workout.len() as u64).saturating_mul(2).saturating_add(1)
    } else {
        workout
            .total_duration_secs()
            .saturating_add(options.lead_in_secs)
            .saturating_add(1)
    }
}

/// Drive a run to completion without waiting on a clock.
pub fn simulate(
    workout: Workout,
    options: RunOptions,
    skip_all: bool,
) -> Result<(RunSummary, Vec<Event>), drillclock_core::CoreError> {
    let limit = command_limit(&workout, options, skip_all);
    let mut run = WorkoutRun::new(workout, options)?;
    let mut events = run.start();
    for _ in 0..limit {
        if run.is_complete() {
            break;
        }
        events.extend(if skip_all { run.skip() } else { run.tick() });
    }
    Ok((run.summary(), events))
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let workout = args.source.resolve(&config)?;
    let options = RunOptions {
        lead_in_secs: args.lead_in,
    };

    let (summary, events) = simulate(workout, options, args.skip_all)?;
    if args.events {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
