use std::collections::{HashMap, HashSet};

use practice_schema::Dataset;
use tracing::warn;

use crate::PracticeError;

/// Reports data-quality problems the builder and aggregator silently
/// tolerate. Never changes what they compute.
pub fn audit(dataset: &Dataset) -> Vec<PracticeError> {
    let mut issues = Vec::new();

    let mut ids: HashSet<&str> = HashSet::new();
    let mut paths: HashMap<&str, &str> = HashMap::new();
    for exercise in &dataset.exercises {
        if !ids.insert(exercise.id.as_str()) {
            issues.push(
                PracticeError::new("E3001", format!("duplicate exercise id: {}", exercise.id))
                    .with_exercise_id(exercise.id.clone()),
            );
        }

        if exercise.segments().iter().any(|s| s.is_empty()) {
            issues.push(
                PracticeError::new(
                    "E3004",
                    format!("empty path segment in exercise name: {:?}", exercise.name),
                )
                .with_exercise_id(exercise.id.clone()),
            );
        }

        match paths.get(exercise.name.as_str()) {
            Some(first) if *first != exercise.id => issues.push(
                PracticeError::new(
                    "E3002",
                    format!(
                        "exercises {first} and {} share the path {:?}; \
                         only {first} appears in the tree",
                        exercise.id, exercise.name
                    ),
                )
                .with_exercise_id(exercise.id.clone()),
            ),
            Some(_) => {}
            None => {
                paths.insert(exercise.name.as_str(), exercise.id.as_str());
            }
        }
    }

    for exercise in &dataset.exercises {
        let prefix = format!("{}/", exercise.name);
        if let Some(deeper) = dataset.exercises.iter().find(|e| e.name.starts_with(&prefix)) {
            issues.push(
                PracticeError::new(
                    "E3006",
                    format!(
                        "exercise path {:?} is a category of {:?}; it will not render as a leaf",
                        exercise.name, deeper.name
                    ),
                )
                .with_exercise_id(exercise.id.clone()),
            );
        }
    }

    for record in &dataset.records {
        if !ids.contains(record.exercise_id.as_str()) {
            issues.push(
                PracticeError::new(
                    "E3003",
                    format!("record references unknown exercise: {}", record.exercise_id),
                )
                .with_exercise_id(record.exercise_id.clone())
                .with_user_id(record.user_id.clone())
                .with_key(record.key)
                .with_tempo(record.tempo),
            );
        }
        if record.score == 0 {
            issues.push(
                PracticeError::new(
                    "E3005",
                    "score 0 is treated as no record in the history rollup",
                )
                .with_exercise_id(record.exercise_id.clone())
                .with_user_id(record.user_id.clone())
                .with_key(record.key)
                .with_tempo(record.tempo),
            );
        }
    }

    if !issues.is_empty() {
        warn!(issues = issues.len(), "dataset audit found issues");
    }
    issues
}
