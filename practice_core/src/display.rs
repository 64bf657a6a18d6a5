//! Maps history slices onto the radial key/tempo chart: fill colour,
//! radius and tooltip text. Nothing here draws.

use std::f64::consts::PI;

use practice_schema::{Bpm, MusicalKey, Score, SCORE_MAX};
use serde::Serialize;

use crate::history::TempoSlice;
use crate::TempoRange;

const SCORE_COLORS: [&str; 6] = [
    "rgb(255, 0, 0)",
    "rgb(255, 102, 0)",
    "rgb(255, 154, 0)",
    "rgb(255, 195, 0)",
    "rgb(255, 235, 0)",
    "rgb(0, 255, 0)",
];

pub const INCOMPLETE_FILL: &str = "lightgray";

const SLICES: usize = 12;

pub fn score_color(score: Score) -> &'static str {
    SCORE_COLORS[usize::from(score.min(SCORE_MAX))]
}

/// Start and end angle in radians of a key's wedge.
pub fn slice_angles(key: MusicalKey) -> (f64, f64) {
    let angle = 2.0 * PI / SLICES as f64;
    let index = key.index() as f64;
    (index * angle + PI, (index + 1.0) * angle + PI)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceView {
    pub key: MusicalKey,
    pub tempo: Bpm,
    pub radius_ratio: f64,
    pub fill: &'static str,
    pub label: String,
}

impl SliceView {
    /// Incomplete slices get the neutral fill and an "X/N" label instead of
    /// the average.
    pub fn from_slice(key: MusicalKey, slice: &TempoSlice, range: &TempoRange) -> Self {
        let (fill, label) = if slice.is_complete() {
            (
                score_color(slice.average_score),
                format!("Average Score: ({})", slice.average_score),
            )
        } else {
            (
                INCOMPLETE_FILL,
                format!(
                    "{}/{} exercises done",
                    slice.completed_count, slice.total_count
                ),
            )
        };
        Self {
            key,
            tempo: slice.tempo,
            radius_ratio: range.radius_ratio(slice.tempo),
            fill,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ExerciseScore;

    fn slice(completed_count: usize, total_count: usize, average_score: Score) -> TempoSlice {
        TempoSlice {
            tempo: 90,
            average_score,
            completed_count,
            total_count,
            best_scores: vec![ExerciseScore {
                exercise_id: "a".to_string(),
                score: average_score,
            }],
        }
    }

    #[test]
    fn palette_clamps_above_max() {
        assert_eq!(score_color(0), "rgb(255, 0, 0)");
        assert_eq!(score_color(3), "rgb(255, 195, 0)");
        assert_eq!(score_color(5), "rgb(0, 255, 0)");
        assert_eq!(score_color(9), "rgb(0, 255, 0)");
    }

    #[test]
    fn complete_slice_uses_score_colour() {
        let view = SliceView::from_slice(MusicalKey::D, &slice(2, 2, 4), &TempoRange::default());
        assert_eq!(view.fill, "rgb(255, 235, 0)");
        assert_eq!(view.label, "Average Score: (4)");
        assert_eq!(view.radius_ratio, 0.5);
    }

    #[test]
    fn incomplete_slice_is_neutral() {
        let view = SliceView::from_slice(MusicalKey::D, &slice(1, 3, 2), &TempoRange::default());
        assert_eq!(view.fill, INCOMPLETE_FILL);
        assert_eq!(view.label, "1/3 exercises done");
    }

    #[test]
    fn wedges_follow_circle_index() {
        let (start, end) = slice_angles(MusicalKey::C);
        assert!((start - PI).abs() < 1e-12);
        assert!((end - (PI + PI / 6.0)).abs() < 1e-12);

        let (start_f, _) = slice_angles(MusicalKey::F);
        assert!((start_f - (11.0 * PI / 6.0 + PI)).abs() < 1e-12);
    }
}
