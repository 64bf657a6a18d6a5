use std::fmt;

use practice_schema::Exercise;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hand {
    Left,
    Right,
    Both,
}

impl Hand {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "Left hand" => Hand::Left,
            "Right hand" => Hand::Right,
            _ => Hand::Both,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hand::Left => "L",
            Hand::Right => "R",
            Hand::Both => "Both",
        })
    }
}

/// Category/hand columns of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLabel {
    pub category: String,
    pub hand: Hand,
}

pub fn row_label(exercise: &Exercise) -> RowLabel {
    let segments = exercise.segments();
    let category = match segments.as_slice() {
        [first] | [first, _] => first.to_string(),
        [first, second, ..] => format!("{first} {second}"),
        [] => String::new(),
    };
    let hand = Hand::from_segment(segments.last().copied().unwrap_or_default());
    RowLabel { category, hand }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(name: &str) -> Exercise {
        Exercise {
            id: "x".to_string(),
            name: name.to_string(),
            order: 0,
        }
    }

    #[test]
    fn three_segment_path_joins_first_two_for_category() {
        let label = row_label(&exercise("Scales/Major/Left hand"));
        assert_eq!(label.category, "Scales Major");
        assert_eq!(label.hand, Hand::Left);
        assert_eq!(label.hand.to_string(), "L");
    }

    #[test]
    fn two_segment_path_uses_first_segment() {
        let label = row_label(&exercise("Arpeggios/Right hand"));
        assert_eq!(label.category, "Arpeggios");
        assert_eq!(label.hand.to_string(), "R");
    }

    #[test]
    fn other_drill_names_are_both_hands() {
        let label = row_label(&exercise("Chords/Inversions/Hands together"));
        assert_eq!(label.hand, Hand::Both);

        let single = row_label(&exercise("Warmup"));
        assert_eq!(single.category, "Warmup");
        assert_eq!(single.hand.to_string(), "Both");
    }
}
