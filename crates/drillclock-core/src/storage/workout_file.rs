//! Workout definition files.
//!
//! A workout file is TOML or JSON with the same shape as [`Workout`]:
//!
//! ```toml
//! name = "Leg Day"
//!
//! [[exercises]]
//! name = "Squats"
//! work_secs = 40
//! rest_secs = 20
//! ```

use std::path::Path;

use crate::error::{CoreError, Result};
use crate::workout::Workout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutFormat {
    Toml,
    Json,
}

impl WorkoutFormat {
    /// `.json` is JSON; anything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => WorkoutFormat::Json,
            _ => WorkoutFormat::Toml,
        }
    }
}

/// Parse workout text without validating it.
pub fn parse_workout(content: &str, format: WorkoutFormat) -> std::result::Result<Workout, String> {
    match format {
        WorkoutFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        WorkoutFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Read, parse and validate a workout file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or
/// describes a workout that cannot be run.
pub fn load_workout(path: &Path) -> Result<Workout> {
    let content = std::fs::read_to_string(path)?;
    let workout = parse_workout(&content, WorkoutFormat::from_path(path)).map_err(|message| {
        CoreError::WorkoutFile {
            path: path.to_path_buf(),
            message,
        }
    })?;
    workout.validate()?;
    tracing::debug!(path = %path.display(), exercises = workout.len(), "loaded workout file");
    Ok(workout)
}
