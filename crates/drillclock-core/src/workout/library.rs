//! Built-in workouts.

use super::plan::{Exercise, Workout};

/// Id and workout pairs, in listing order.
pub fn builtin_workouts() -> Vec<(&'static str, Workout)> {
    vec![
        ("bodyweight-circuit", bodyweight_circuit()),
        ("tabata-sprint", tabata_sprint()),
        ("mobility-flow", mobility_flow()),
    ]
}

/// Find a built-in workout by id.
pub fn find_workout(id: &str) -> Option<Workout> {
    builtin_workouts()
        .into_iter()
        .find(|(wid, _)| *wid == id)
        .map(|(_, w)| w)
}

pub fn workout_ids() -> Vec<&'static str> {
    vec!["bodyweight-circuit", "tabata-sprint", "mobility-flow"]
}

fn exercise(name: &str, work_secs: u64, rest_secs: u64, description: &str) -> Exercise {
    Exercise {
        name: name.to_string(),
        work_secs,
        rest_secs,
        description: description.to_string(),
    }
}

/// General conditioning circuit used for academy warm-ups.
fn bodyweight_circuit() -> Workout {
    Workout {
        name: "Bodyweight Circuit".to_string(),
        description: indoc::indoc! {"
            Full-body circuit for squad warm-ups. Each station runs for
            45 seconds with 15 seconds to move to the next one.
            The plank closes the circuit with no rest after it.
        "}
        .to_string(),
        exercises: vec![
            exercise("Jumping Jacks", 45, 15, "Arms fully overhead on every rep"),
            exercise("Push-ups", 45, 15, "Knees down if form breaks"),
            exercise("Squats", 45, 15, "Hips below knees"),
            exercise("Mountain Climbers", 45, 15, ""),
            exercise("Plank", 60, 0, "Straight line from head to heel"),
        ],
    }
}

/// Classic 20/10 interval protocol.
fn tabata_sprint() -> Workout {
    let rounds = (1..=8)
        .map(|round| {
            let rest = if round == 8 { 0 } else { 10 };
            exercise(&format!("Sprint {round}"), 20, rest, "")
        })
        .collect();
    Workout {
        name: "Tabata Sprint".to_string(),
        description: indoc::indoc! {"
            Eight rounds of 20 seconds all-out effort followed by
            10 seconds of rest. Four minutes in total.
        "}
        .to_string(),
        exercises: rounds,
    }
}

/// Cool-down stretches, continuous with no rests.
fn mobility_flow() -> Workout {
    Workout {
        name: "Mobility Flow".to_string(),
        description: indoc::indoc! {"
            Continuous cool-down sequence. Move straight from one
            stretch to the next.
        "}
        .to_string(),
        exercises: vec![
            exercise("Hip Openers", 60, 0, ""),
            exercise("Hamstring Stretch", 60, 0, "Alternate legs at 30 seconds"),
            exercise("Thoracic Rotations", 45, 0, ""),
            exercise("Child's Pose", 60, 0, ""),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtins_validate() {
        for (id, workout) in builtin_workouts() {
            assert!(workout.validate().is_ok(), "{id} should be valid");
            assert!(!workout.description.is_empty());
        }
    }

    #[test]
    fn ids_match_builtins() {
        let ids: Vec<_> = builtin_workouts().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, workout_ids());
    }

    #[test]
    fn find_workout_by_id() {
        let w = find_workout("tabata-sprint").unwrap();
        assert_eq!(w.len(), 8);
        assert_eq!(w.total_duration_secs(), 8 * 20 + 7 * 10);
        assert!(find_workout("unknown").is_none());
    }

    #[test]
    fn last_exercises_have_no_rest() {
        for (_, workout) in builtin_workouts() {
            assert_eq!(workout.exercises.last().unwrap().rest_secs, 0);
        }
    }
}
