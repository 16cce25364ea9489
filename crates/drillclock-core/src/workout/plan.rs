use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One movement in a workout: an active phase followed by an optional rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Duration of the working phase in seconds. Must be positive.
    pub work_secs: u64,
    /// Duration of the rest after this exercise. 0 means no rest.
    #[serde(default)]
    pub rest_secs: u64,
    #[serde(default)]
    pub description: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, work_secs: u64, rest_secs: u64) -> Self {
        Self {
            name: name.into(),
            work_secs,
            rest_secs,
            description: String::new(),
        }
    }

    /// Work plus rest, saturating.
    pub fn total_secs(&self) -> u64 {
        self.work_secs.saturating_add(self.rest_secs)
    }
}

/// An ordered list of exercises. Order is execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            exercises,
        }
    }

    /// Check that the workout can be run.
    ///
    /// Rejects an empty exercise list, blank names and zero-length working
    /// phases. Rest phases may be zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exercises.is_empty() {
            return Err(ValidationError::EmptyCollection("exercises".into()));
        }
        for (i, exercise) in self.exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("exercises[{i}].name"),
                    message: "must not be empty".into(),
                });
            }
            if exercise.work_secs == 0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("exercises[{i}].work_secs"),
                    message: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    /// Planned seconds of the whole workout, saturating at `u64::MAX`.
    pub fn total_duration_secs(&self) -> u64 {
        self.exercises
            .iter()
            .map(Exercise::total_secs)
            .fold(0, u64::saturating_add)
    }

    /// Planned seconds of every exercise before `index` (work and rest).
    pub fn cumulative_secs(&self, index: usize) -> u64 {
        self.exercises
            .iter()
            .take(index)
            .map(Exercise::total_secs)
            .fold(0, u64::saturating_add)
    }
}
