mod config;
mod workout_file;

pub use config::{Config, FeedbackConfig, RunConfig};
pub use workout_file::{load_workout, parse_workout, WorkoutFormat};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/drillclock[-dev]/` based on DRILLCLOCK_ENV.
///
/// Set DRILLCLOCK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DRILLCLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("drillclock-dev")
    } else {
        base_dir.join("drillclock")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
