//! Live host: drives a run from a ticker and stdin commands.
//!
//! Events are printed to stdout as JSON lines. Commands are read from stdin,
//! one per line:
//!
//! ```text
//! p  pause        r  resume      <empty>  toggle pause
//! s  skip         b  previous    q        exit
//! ```

use std::io::Write;
use std::time::Duration;

use clap::Args;
use drillclock_core::{Config, Event, RunOptions, Ticker, WorkoutRun};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::WorkoutSource;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: WorkoutSource,
    /// Lead-in seconds before the first exercise (overrides config)
    #[arg(long)]
    pub lead_in: Option<u64>,
    /// Tick interval in milliseconds (overrides config)
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Disable the terminal bell
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Pause,
    Resume,
    Toggle,
    Skip,
    Previous,
    Exit,
}

impl HostCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Some(HostCommand::Toggle),
            "p" | "pause" => Some(HostCommand::Pause),
            "r" | "resume" => Some(HostCommand::Resume),
            "s" | "skip" => Some(HostCommand::Skip),
            "b" | "back" | "previous" => Some(HostCommand::Previous),
            "q" | "quit" | "exit" => Some(HostCommand::Exit),
            _ => None,
        }
    }
}

/// Returns true if the run should exit.
fn apply(run: &mut WorkoutRun, ticker: &mut Ticker, command: HostCommand) -> bool {
    match command {
        HostCommand::Pause => {
            run.pause();
        }
        HostCommand::Resume => {
            if !run.resume().is_empty() {
                ticker.reset();
            }
        }
        HostCommand::Toggle => {
            if run.is_paused() {
                return apply(run, ticker, HostCommand::Resume);
            }
            run.pause();
        }
        HostCommand::Skip => {
            run.skip();
        }
        HostCommand::Previous => {
            run.previous();
        }
        HostCommand::Exit => return true,
    }
    false
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
    }
}

fn ring_bell() {
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let workout = args.source.resolve(&config)?;
    let options = RunOptions {
        lead_in_secs: args.lead_in.unwrap_or(config.run.lead_in_secs),
    };
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(config.run.tick_interval_ms));

    let mut run = WorkoutRun::new(workout, options)?;
    let bell_on_phase = !args.quiet && config.feedback.bell_on_phase_change;
    let bell_on_complete = !args.quiet && config.feedback.bell_on_complete;
    run.subscribe(move |event| {
        print_event(event);
        match event {
            Event::PhaseStarted { .. } if bell_on_phase => ring_bell(),
            Event::WorkoutCompleted { .. } if bell_on_complete => ring_bell(),
            _ => {}
        }
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let input = BufReader::new(tokio::io::stdin());
    let summary = runtime.block_on(drive(run, interval, input));
    // A stdin read may still be parked on a blocking thread.
    runtime.shutdown_background();
    let summary = summary?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn drive<R>(
    mut run: WorkoutRun,
    interval: Duration,
    input: R,
) -> Result<drillclock_core::RunSummary, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut ticker = Ticker::new(interval);
    let mut lines = input.lines();
    let mut input_open = true;

    run.start();
    loop {
        if run.is_complete() {
            break Ok(run.summary());
        }
        tokio::select! {
            _ = ticker.next() => {
                run.tick();
            }
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => match HostCommand::parse(&line) {
                        Some(command) => {
                            if apply(&mut run, &mut ticker, command) {
                                break Ok(run.exit());
                            }
                        }
                        None => eprintln!("unknown command: {}", line.trim()),
                    },
                    // Nothing could resume a paused run once input is gone.
                    None if run.is_paused() => {
                        tracing::info!("input closed while paused, exiting run");
                        break Ok(run.exit());
                    }
                    None => {
                        tracing::debug!("input closed, running without commands");
                        input_open = false;
                    }
                }
            }
        }
    }
}
