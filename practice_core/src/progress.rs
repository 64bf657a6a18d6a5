use practice_schema::{Bpm, Exercise, ExerciseId, MusicalKey, PracticeRecord, Score, UserId};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseScore {
    pub exercise_id: ExerciseId,
    pub score: Score,
}

/// Progress for one user at one key and tempo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    /// One entry per exercise, in exercise order; 0 when unrecorded.
    pub scores: Vec<ExerciseScore>,
    pub completed_count: usize,
    pub total_count: usize,
}

impl ProgressSummary {
    pub fn score_for(&self, exercise_id: &str) -> Option<Score> {
        self.scores
            .iter()
            .find(|s| s.exercise_id == exercise_id)
            .map(|s| s.score)
    }

    pub fn completion_label(&self) -> String {
        format!("{}/{}", self.completed_count, self.total_count)
    }
}

/// Caller-side selection of records: one user, optionally one key and tempo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub user_id: UserId,
    pub key: Option<MusicalKey>,
    pub tempo: Option<Bpm>,
}

impl RecordFilter {
    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            key: None,
            tempo: None,
        }
    }

    pub fn with_key(mut self, key: MusicalKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_tempo(mut self, tempo: Bpm) -> Self {
        self.tempo = Some(tempo);
        self
    }

    pub fn matches(&self, record: &PracticeRecord) -> bool {
        record.user_id == self.user_id
            && self.key.map_or(true, |k| record.key == k)
            && self.tempo.map_or(true, |t| record.tempo == t)
    }

    pub fn apply(&self, records: &[PracticeRecord]) -> Vec<PracticeRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Scores every exercise against records already narrowed to one
/// user, key and tempo. The first matching record wins.
#[instrument(skip_all, fields(exercises = exercises.len(), records = records.len()))]
pub fn aggregate_progress(exercises: &[Exercise], records: &[PracticeRecord]) -> ProgressSummary {
    let mut completed_count = 0;
    let scores: Vec<ExerciseScore> = exercises
        .iter()
        .map(|exercise| {
            let record = records.iter().find(|r| r.exercise_id == exercise.id);
            if record.is_some() {
                completed_count += 1;
            }
            ExerciseScore {
                exercise_id: exercise.id.clone(),
                score: record.map_or(0, |r| r.score),
            }
        })
        .collect();

    let summary = ProgressSummary {
        scores,
        completed_count,
        total_count: exercises.len(),
    };
    debug!(completed = %summary.completion_label(), "aggregated progress");
    summary
}

/// Highest-scoring record for one exercise at a key and tempo.
pub fn best_record<'a>(
    records: &'a [PracticeRecord],
    exercise_id: &str,
    user_id: &str,
    key: MusicalKey,
    tempo: Bpm,
) -> Option<&'a PracticeRecord> {
    records
        .iter()
        .filter(|r| {
            r.exercise_id == exercise_id && r.user_id == user_id && r.key == key && r.tempo == tempo
        })
        .fold(None, |best: Option<&PracticeRecord>, r| match best {
            Some(b) if b.score >= r.score => Some(b),
            _ => Some(r),
        })
}
