use practice_schema::{Bpm, TEMPO_MAX, TEMPO_MIN, TEMPO_STEP};

pub mod audit;
pub mod display;
mod error;
pub mod history;
pub mod label;
pub mod progress;
pub mod store;
pub mod taxonomy;

pub use error::{PracticeError, PracticeErrorKind};
pub use history::{aggregate_history, KeyHistory, TempoSlice};
pub use progress::{aggregate_progress, ExerciseScore, ProgressSummary, RecordFilter};
pub use taxonomy::{build_taxonomy, Taxonomy, TreeNode};

/// Tempo grid a practice session can select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoRange {
    pub min: Bpm,
    pub max: Bpm,
    pub step: Bpm,
}

impl Default for TempoRange {
    fn default() -> Self {
        Self {
            min: TEMPO_MIN,
            max: TEMPO_MAX,
            step: TEMPO_STEP,
        }
    }
}

impl TempoRange {
    /// Chart radius of a tempo ring relative to the outermost ring.
    pub fn radius_ratio(&self, tempo: Bpm) -> f64 {
        f64::from(tempo) / f64::from(self.max.max(1))
    }

    pub fn tempos(&self) -> impl Iterator<Item = Bpm> + '_ {
        (self.min..=self.max).step_by(usize::from(self.step.max(1)))
    }
}
