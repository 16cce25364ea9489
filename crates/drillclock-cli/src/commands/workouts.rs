use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use drillclock_core::{builtin_workouts, find_workout, load_workout, CoreError, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Toml,
    Json,
}

#[derive(Subcommand)]
pub enum WorkoutsAction {
    /// List built-in workouts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a built-in workout so it can be saved and edited
    Show {
        /// Workout id
        id: String,
        #[arg(long, value_enum, default_value = "toml")]
        format: OutputFormat,
    },
    /// Check that a workout file can be run
    Validate {
        /// Path to a .toml or .json workout file
        path: PathBuf,
    },
}

fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn render(workout: &Workout, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Toml => toml::to_string_pretty(workout)?,
        OutputFormat::Json => serde_json::to_string_pretty(workout)?,
    })
}

pub fn run(action: WorkoutsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WorkoutsAction::List { json } => {
            let workouts = builtin_workouts();
            if json {
                let listing: Vec<_> = workouts
                    .iter()
                    .map(|(id, w)| {
                        serde_json::json!({
                            "id": id,
                            "name": w.name,
                            "exercises": w.len(),
                            "total_secs": w.total_duration_secs(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for (id, w) in &workouts {
                    println!(
                        "{id:<20} {:<20} {:>2} exercises  {}",
                        w.name,
                        w.len(),
                        format_duration(w.total_duration_secs())
                    );
                }
            }
        }
        WorkoutsAction::Show { id, format } => {
            let workout = find_workout(&id).ok_or(CoreError::UnknownWorkout(id))?;
            print!("{}", render(&workout, format)?);
        }
        WorkoutsAction::Validate { path } => {
            let workout = load_workout(&path)?;
            println!(
                "ok: {} ({} exercises, {})",
                workout.name,
                workout.len(),
                format_duration(workout.total_duration_secs())
            );
        }
    }
    Ok(())
}
