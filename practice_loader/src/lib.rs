use std::{fs, path::Path};

use anyhow::Context;
use practice_schema::Dataset;
use tracing::debug;

pub fn load_dataset_from_path(path: impl AsRef<Path>) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let dataset: Dataset = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse dataset json: {}", path.display()))?;
    debug!(
        path = %path.display(),
        exercises = dataset.exercises.len(),
        records = dataset.records.len(),
        "loaded dataset"
    );
    Ok(sorted(dataset))
}

pub fn load_dataset_from_str(json: &str) -> anyhow::Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(json).context("failed to parse dataset json")?;
    Ok(sorted(dataset))
}

pub fn save_dataset_to_path(path: impl AsRef<Path>, dataset: &Dataset) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(dataset).context("failed to serialize dataset")?;
    fs::write(path, json).with_context(|| format!("failed to write: {}", path.display()))?;
    Ok(())
}

// Exercises are consumed in `order`; ties keep file order.
fn sorted(mut dataset: Dataset) -> Dataset {
    dataset.exercises.sort_by_key(|e| e.order);
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercises_are_sorted_by_order() {
        let json = r#"{
            "exercises": [
                {"id": "b", "name": "Scales/Major/Right hand", "order": 2},
                {"id": "a", "name": "Scales/Major/Left hand", "order": 1},
                {"id": "c", "name": "Arpeggios/Left hand", "order": 2}
            ]
        }"#;

        let dataset = load_dataset_from_str(json).unwrap();
        let ids: Vec<&str> = dataset.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(dataset.records.is_empty());
    }

    #[test]
    fn invalid_key_is_a_parse_error() {
        let json = r#"{"records": [
            {"exercise_id": "a", "user_id": "u", "key": "H", "tempo": 60, "score": 1}
        ]}"#;
        let err = load_dataset_from_str(json).unwrap_err();
        assert!(err.to_string().contains("failed to parse dataset json"));
    }

    #[test]
    fn save_then_load_keeps_records() {
        let path = std::env::temp_dir().join(format!(
            "practice_loader_save_{}.json",
            std::process::id()
        ));
        let dataset = load_dataset_from_str(
            r#"{"exercises":[{"id":"a","name":"Warmup","order":0}],
                "records":[{"exercise_id":"a","user_id":"u","key":"Eb","tempo":70,"score":3}]}"#,
        )
        .unwrap();

        save_dataset_to_path(&path, &dataset).unwrap();
        let back = load_dataset_from_path(&path).unwrap();
        assert_eq!(back, dataset);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_dataset_from_path("/nonexistent/practice.json").unwrap_err();
        assert!(err.to_string().contains("failed to read dataset: /nonexistent/practice.json"));
    }
}
