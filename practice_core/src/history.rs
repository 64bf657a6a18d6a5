use std::collections::{BTreeMap, HashMap, HashSet};

use practice_schema::{Bpm, Exercise, MusicalKey, PracticeRecord, Score};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::progress::ExerciseScore;

/// Rollup of one (key, tempo) pair across the whole exercise set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoSlice {
    pub tempo: Bpm,
    pub average_score: Score,
    /// Known exercises with a best score at this tempo.
    pub completed_count: usize,
    pub total_count: usize,
    /// Best score per exercise, first-seen order. May include ids that are
    /// not in the exercise list.
    pub best_scores: Vec<ExerciseScore>,
}

impl TempoSlice {
    pub fn completion_ratio(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.total_count as f64
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count == self.total_count
    }

    pub fn score_for(&self, exercise_id: &str) -> Option<Score> {
        self.best_scores
            .iter()
            .find(|s| s.exercise_id == exercise_id)
            .map(|s| s.score)
    }
}

pub type KeyHistory = BTreeMap<MusicalKey, Vec<TempoSlice>>;

fn group_by_key(records: &[PracticeRecord]) -> BTreeMap<MusicalKey, Vec<&PracticeRecord>> {
    let mut groups: BTreeMap<MusicalKey, Vec<&PracticeRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key).or_default().push(record);
    }
    groups
}

/// Rolls a user's full record set up into per-key slices, highest tempo first.
///
/// Records with a tempo or score of 0 are skipped, so a real zero score is
/// indistinguishable from no record at all.
#[instrument(skip_all, fields(exercises = exercises.len(), records = records.len()))]
pub fn aggregate_history(exercises: &[Exercise], records: &[PracticeRecord]) -> KeyHistory {
    let known: HashSet<&str> = exercises.iter().map(|e| e.id.as_str()).collect();
    let divisor = exercises.len().max(1);

    let mut history = KeyHistory::new();
    for (key, key_records) in group_by_key(records) {
        let slices = rollup_key(&key_records, &known, exercises.len(), divisor);
        debug!(%key, slices = slices.len(), "rolled up key");
        history.insert(key, slices);
    }
    history
}

fn rollup_key(
    records: &[&PracticeRecord],
    known: &HashSet<&str>,
    total_count: usize,
    divisor: usize,
) -> Vec<TempoSlice> {
    // best score per (exercise, tempo)
    let mut best: Vec<(&str, Bpm, Score)> = Vec::new();
    let mut index: HashMap<(&str, Bpm), usize> = HashMap::new();
    for record in records {
        if record.tempo == 0 || record.score == 0 {
            continue;
        }
        let slot = (record.exercise_id.as_str(), record.tempo);
        match index.get(&slot) {
            Some(&i) => {
                if record.score > best[i].2 {
                    best[i].2 = record.score;
                }
            }
            None => {
                index.insert(slot, best.len());
                best.push((slot.0, slot.1, record.score));
            }
        }
    }

    let mut by_tempo: BTreeMap<Bpm, Vec<ExerciseScore>> = BTreeMap::new();
    for (exercise_id, tempo, score) in best {
        by_tempo.entry(tempo).or_default().push(ExerciseScore {
            exercise_id: exercise_id.to_string(),
            score,
        });
    }

    by_tempo
        .into_iter()
        .rev()
        .map(|(tempo, best_scores)| {
            let sum: u32 = best_scores.iter().map(|s| u32::from(s.score)).sum();
            let average = (f64::from(sum) / divisor as f64).round();
            let completed_count = best_scores
                .iter()
                .filter(|s| known.contains(s.exercise_id.as_str()))
                .count();
            TempoSlice {
                tempo,
                average_score: average as Score,
                completed_count,
                total_count,
                best_scores,
            }
        })
        .collect()
}
