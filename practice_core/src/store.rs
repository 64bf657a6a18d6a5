use practice_schema::{PracticeRecord, RecordSlot, SCORE_MAX};
use tracing::{debug, instrument};

use crate::{PracticeError, TempoRange};

/// In-memory record set. New writes keep at most one record per
/// (user, exercise, key, tempo); rows loaded from older data may hold
/// several per slot and are kept as they are.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<PracticeRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<PracticeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PracticeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PracticeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every row in the slot, in stored order.
    pub fn slot_records(&self, slot: &RecordSlot) -> Vec<&PracticeRecord> {
        self.records.iter().filter(|r| slot.matches(r)).collect()
    }

    pub fn for_user(&self, user_id: &str) -> Vec<PracticeRecord> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    fn occupied(&self, slot: &RecordSlot) -> bool {
        self.records.iter().any(|r| slot.matches(r))
    }

    pub fn insert(&mut self, record: PracticeRecord) -> Result<(), PracticeError> {
        if self.occupied(&record.slot()) {
            return Err(slot_error(
                "E2001",
                "record already exists for this exercise, key and tempo",
                &record.slot(),
            ));
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes every row in the slot; other slots keep their order.
    pub fn delete(&mut self, slot: &RecordSlot) -> Result<Vec<PracticeRecord>, PracticeError> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| slot.matches(r));
        self.records = kept;
        if removed.is_empty() {
            return Err(slot_error(
                "E2002",
                "no record for this exercise, key and tempo",
                slot,
            ));
        }
        Ok(removed)
    }

    /// Re-scores a slot the way the hosted store does it: delete, then insert.
    /// Between the two steps the slot has no record.
    #[instrument(
        skip_all,
        fields(exercise_id = %record.exercise_id, key = %record.key, tempo = record.tempo)
    )]
    pub fn replace(&mut self, record: PracticeRecord) -> Result<(), PracticeError> {
        match self.delete(&record.slot()) {
            Ok(old) => debug!(removed = old.len(), new_score = record.score, "replacing record"),
            Err(_) => debug!(new_score = record.score, "no previous record"),
        }
        self.insert(record)
    }

    /// Single-step replace keyed by slot. The record takes the position of
    /// the slot's first row; any further rows in the slot are returned with
    /// the replaced one.
    pub fn upsert(&mut self, record: PracticeRecord) -> Vec<PracticeRecord> {
        let slot = record.slot();
        let Some(first) = self.records.iter().position(|r| slot.matches(r)) else {
            self.records.push(record);
            return Vec::new();
        };

        let mut replaced = vec![std::mem::replace(&mut self.records[first], record)];
        let mut i = first + 1;
        while i < self.records.len() {
            if slot.matches(&self.records[i]) {
                replaced.push(self.records.remove(i));
            } else {
                i += 1;
            }
        }
        replaced
    }
}

fn slot_error(code: &'static str, message: &str, slot: &RecordSlot) -> PracticeError {
    PracticeError::new(code, message)
        .with_user_id(slot.user_id.clone())
        .with_exercise_id(slot.exercise_id.clone())
        .with_key(slot.key)
        .with_tempo(slot.tempo)
}

/// Rejects scores above 5 and tempos off the configured grid.
pub fn validate_record(record: &PracticeRecord, range: &TempoRange) -> Result<(), PracticeError> {
    if record.score > SCORE_MAX {
        return Err(PracticeError::new(
            "E1001",
            format!("score must be 0..={SCORE_MAX} (got {})", record.score),
        )
        .with_exercise_id(record.exercise_id.clone()));
    }
    if record.tempo < range.min || record.tempo > range.max {
        return Err(PracticeError::new(
            "E1002",
            format!(
                "tempo must be {}..={} bpm (got {})",
                range.min, range.max, record.tempo
            ),
        )
        .with_tempo(record.tempo));
    }
    if range.step > 0 && (record.tempo - range.min) % range.step != 0 {
        return Err(PracticeError::new(
            "E1003",
            format!(
                "tempo must be a multiple of {} from {} (got {})",
                range.step, range.min, record.tempo
            ),
        )
        .with_tempo(record.tempo));
    }
    Ok(())
}
