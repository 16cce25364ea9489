pub mod config;
pub mod run;
pub mod simulate;
pub mod workouts;

use std::path::PathBuf;

use clap::Args;
use drillclock_core::{find_workout, load_workout, Config, CoreError, Workout};

/// Where the workout for a run comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkoutSource {
    /// Built-in workout id (see `workouts list`)
    #[arg(long, conflicts_with = "file")]
    pub workout: Option<String>,
    /// Workout file (.toml or .json)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl WorkoutSource {
    /// File wins over id; with neither, the configured workout is used.
    pub fn resolve(&self, config: &Config) -> Result<Workout, CoreError> {
        if let Some(ref path) = self.file {
            return load_workout(path);
        }
        if let Some(ref id) = self.workout {
            return find_workout(id).ok_or_else(|| CoreError::UnknownWorkout(id.clone()));
        }
        config.workout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtin_id() {
        let source = WorkoutSource {
            workout: Some("mobility-flow".into()),
            file: None,
        };
        let workout = source.resolve(&Config::default()).unwrap();
        assert_eq!(workout.name, "Mobility Flow");
    }

    #[test]
    fn unknown_id_is_an_error() {
        let source = WorkoutSource {
            workout: Some("nope".into()),
            file: None,
        };
        assert!(matches!(
            source.resolve(&Config::default()),
            Err(CoreError::UnknownWorkout(_))
        ));
    }

    #[test]
    fn falls_back_to_config() {
        let workout = WorkoutSource::default().resolve(&Config::default()).unwrap();
        assert_eq!(workout.name, "Bodyweight Circuit");
    }
}
