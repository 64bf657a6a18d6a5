use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub type ExerciseId = String;
pub type UserId = String;
pub type Bpm = u16;
pub type Score = u8;

pub const TEMPO_MIN: Bpm = 45;
pub const TEMPO_MAX: Bpm = 180;
pub const TEMPO_STEP: Bpm = 5;
pub const DEFAULT_TEMPO: Bpm = 60;
pub const SCORE_MAX: Score = 5;

/// A practice drill. `name` is a `/`-separated category path whose last
/// segment is the concrete drill ("Scales/Major/Left hand").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

impl Exercise {
    pub fn segments(&self) -> Vec<&str> {
        self.name.split('/').collect()
    }
}

/// One scored attempt of an exercise at a key and tempo.
///
/// `tempo` and `score` default to 0 when the stored row has them unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PracticeRecord {
    pub exercise_id: ExerciseId,
    pub user_id: UserId,
    pub key: MusicalKey,
    #[serde(default)]
    pub tempo: Bpm,
    #[serde(default)]
    pub score: Score,
}

impl PracticeRecord {
    pub fn slot(&self) -> RecordSlot {
        RecordSlot {
            user_id: self.user_id.clone(),
            exercise_id: self.exercise_id.clone(),
            key: self.key,
            tempo: self.tempo,
        }
    }
}

/// Uniqueness key of a practice record: at most one record per slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordSlot {
    pub user_id: UserId,
    pub exercise_id: ExerciseId,
    pub key: MusicalKey,
    pub tempo: Bpm,
}

impl RecordSlot {
    pub fn matches(&self, record: &PracticeRecord) -> bool {
        record.user_id == self.user_id
            && record.exercise_id == self.exercise_id
            && record.key == self.key
            && record.tempo == self.tempo
    }
}

/// The twelve canonical keys, declared in circle-of-fifths order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MusicalKey {
    C,
    G,
    D,
    A,
    E,
    B,
    #[serde(alias = "F#")]
    Gb,
    #[serde(alias = "C#")]
    Db,
    #[serde(alias = "G#")]
    Ab,
    #[serde(alias = "D#")]
    Eb,
    #[serde(alias = "A#")]
    Bb,
    F,
}

impl MusicalKey {
    pub const ALL: [MusicalKey; 12] = [
        MusicalKey::C,
        MusicalKey::G,
        MusicalKey::D,
        MusicalKey::A,
        MusicalKey::E,
        MusicalKey::B,
        MusicalKey::Gb,
        MusicalKey::Db,
        MusicalKey::Ab,
        MusicalKey::Eb,
        MusicalKey::Bb,
        MusicalKey::F,
    ];

    /// Position on the circle of fifths, 0 (C) through 11 (F).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            MusicalKey::C => "C",
            MusicalKey::G => "G",
            MusicalKey::D => "D",
            MusicalKey::A => "A",
            MusicalKey::E => "E",
            MusicalKey::B => "B",
            MusicalKey::Gb => "Gb",
            MusicalKey::Db => "Db",
            MusicalKey::Ab => "Ab",
            MusicalKey::Eb => "Eb",
            MusicalKey::Bb => "Bb",
            MusicalKey::F => "F",
        }
    }
}

impl fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown musical key: {:?}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for MusicalKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "C" => MusicalKey::C,
            "G" => MusicalKey::G,
            "D" => MusicalKey::D,
            "A" => MusicalKey::A,
            "E" => MusicalKey::E,
            "B" => MusicalKey::B,
            "Gb" | "F#" => MusicalKey::Gb,
            "Db" | "C#" => MusicalKey::Db,
            "Ab" | "G#" => MusicalKey::Ab,
            "Eb" | "D#" => MusicalKey::Eb,
            "Bb" | "A#" => MusicalKey::Bb,
            "F" => MusicalKey::F,
            other => return Err(ParseKeyError(other.to_string())),
        };
        Ok(key)
    }
}

/// On-disk interchange format: the exercise list plus the record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub records: Vec<PracticeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_order_follows_circle_of_fifths() {
        let names: Vec<&str> = MusicalKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            ["C", "G", "D", "A", "E", "B", "Gb", "Db", "Ab", "Eb", "Bb", "F"]
        );
        assert_eq!(MusicalKey::C.index(), 0);
        assert_eq!(MusicalKey::Ab.index(), 8);
        assert_eq!(MusicalKey::F.index(), 11);
        assert!(MusicalKey::C < MusicalKey::G);
        assert!(MusicalKey::Bb < MusicalKey::F);
    }

    #[test]
    fn key_parses_sharp_aliases() {
        assert_eq!("G#".parse::<MusicalKey>().unwrap(), MusicalKey::Ab);
        assert_eq!("F#".parse::<MusicalKey>().unwrap(), MusicalKey::Gb);
        assert_eq!(" Eb ".parse::<MusicalKey>().unwrap(), MusicalKey::Eb);
        assert!("H".parse::<MusicalKey>().is_err());
    }

    #[test]
    fn record_defaults_missing_tempo_and_score_to_zero() {
        let v = serde_json::json!({
            "exercise_id": "a",
            "user_id": "u1",
            "key": "G#"
        });

        let record: PracticeRecord = serde_json::from_value(v).unwrap();
        assert_eq!(record.key, MusicalKey::Ab);
        assert_eq!(record.tempo, 0);
        assert_eq!(record.score, 0);
    }

    #[test]
    fn record_serializes_key_by_name() {
        let record = PracticeRecord {
            exercise_id: "a".to_string(),
            user_id: "u1".to_string(),
            key: MusicalKey::Bb,
            tempo: 100,
            score: 4,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["key"], "Bb");
        assert_eq!(json["tempo"], 100);
        assert_eq!(json["score"], 4);
    }

    #[test]
    fn slot_matches_only_same_user_exercise_key_tempo() {
        let record = PracticeRecord {
            exercise_id: "a".to_string(),
            user_id: "u1".to_string(),
            key: MusicalKey::C,
            tempo: 60,
            score: 3,
        };
        let slot = record.slot();
        assert!(slot.matches(&record));

        let other = PracticeRecord {
            tempo: 65,
            ..record.clone()
        };
        assert!(!slot.matches(&other));
    }

    #[test]
    fn dataset_fields_default_to_empty() {
        let dataset: Dataset = serde_json::from_str("{}").unwrap();
        assert!(dataset.exercises.is_empty());
        assert!(dataset.records.is_empty());

        let ex: Exercise =
            serde_json::from_str(r#"{"id":"x","name":"Arpeggios/Both hands"}"#).unwrap();
        assert_eq!(ex.order, 0);
        assert_eq!(ex.segments(), vec!["Arpeggios", "Both hands"]);
    }
}
