use practice_schema::{Bpm, ExerciseId, MusicalKey, UserId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeErrorKind {
    Validation,
    Store,
    DataQuality,
}

impl PracticeErrorKind {
    pub(crate) fn from_code(code: &'static str) -> Self {
        match code {
            // Validation
            "E1001" | "E1002" | "E1003" => Self::Validation,

            // Store
            "E2001" | "E2002" => Self::Store,

            // DataQuality
            "E3001" | "E3002" | "E3003" | "E3004" | "E3005" | "E3006" => Self::DataQuality,

            _ => Self::Validation,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct PracticeError {
    pub code: &'static str,
    pub kind: PracticeErrorKind,
    pub message: String,

    pub exercise_id: Option<ExerciseId>,
    pub user_id: Option<UserId>,
    pub key: Option<MusicalKey>,
    pub tempo: Option<Bpm>,
}

impl PracticeError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: PracticeErrorKind::from_code(code),
            message: message.into(),

            exercise_id: None,
            user_id: None,
            key: None,
            tempo: None,
        }
    }

    pub fn with_exercise_id(mut self, exercise_id: impl Into<ExerciseId>) -> Self {
        self.exercise_id = Some(exercise_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_key(mut self, key: MusicalKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_tempo(mut self, tempo: Bpm) -> Self {
        self.tempo = Some(tempo);
        self
    }
}
