use std::{collections::BTreeMap, fmt::Write};

use practice_core::{
    display::SliceView, label::row_label, ExerciseScore, KeyHistory, ProgressSummary, Taxonomy,
    TempoRange, TreeNode,
};
use practice_schema::{Bpm, Exercise, MusicalKey, Score};
use serde::Serialize;

pub fn render_tree(taxonomy: &Taxonomy) -> String {
    let mut out = String::new();
    for node in taxonomy {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.is_leaf() {
        let _ = writeln!(out, "{indent}{} [{}]", node.name, node.id);
        return;
    }
    let _ = writeln!(out, "{indent}{}", node.name);
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

/// `best` holds the best stored score per exercise, in exercise order.
pub fn render_progress(
    exercises: &[Exercise],
    summary: &ProgressSummary,
    best: &[Option<Score>],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:<5} {:<5} Best", "Category", "Hands", "Score");
    for ((exercise, score), best) in exercises.iter().zip(&summary.scores).zip(best) {
        let label = row_label(exercise);
        let best = best.map_or_else(|| "-".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "{:<24} {:<5} {:<5} {}",
            label.category,
            label.hand.to_string(),
            score.score,
            best
        );
    }
    let _ = writeln!(out, "completed: {}", summary.completion_label());
    out
}

pub fn render_history(history: &KeyHistory, range: &TempoRange) -> String {
    let mut out = String::new();
    for (key, slices) in history {
        let _ = writeln!(out, "{key}:");
        if slices.is_empty() {
            let _ = writeln!(out, "  (no scored tempos)");
        }
        for slice in slices {
            let view = SliceView::from_slice(*key, slice, range);
            let _ = writeln!(out, "  {:>3} bpm  {}", slice.tempo, view.label);
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub tempo: Bpm,
    pub average_score: Score,
    pub completion_ratio: f64,
    pub complete: bool,
    pub fill: &'static str,
    pub radius_ratio: f64,
    pub label: String,
    pub best_scores: &'a [ExerciseScore],
}

pub fn history_entries<'a>(
    history: &'a KeyHistory,
    range: &TempoRange,
) -> BTreeMap<MusicalKey, Vec<HistoryEntry<'a>>> {
    history
        .iter()
        .map(|(key, slices)| {
            let entries = slices
                .iter()
                .map(|slice| {
                    let view = SliceView::from_slice(*key, slice, range);
                    HistoryEntry {
                        tempo: slice.tempo,
                        average_score: slice.average_score,
                        completion_ratio: slice.completion_ratio(),
                        complete: slice.is_complete(),
                        fill: view.fill,
                        radius_ratio: view.radius_ratio,
                        label: view.label,
                        best_scores: &slice.best_scores,
                    }
                })
                .collect();
            (*key, entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::build_taxonomy;

    #[test]
    fn tree_is_indented_by_depth() {
        let exercises = vec![
            Exercise {
                id: "a".to_string(),
                name: "Scales/Major/Left hand".to_string(),
                order: 0,
            },
            Exercise {
                id: "b".to_string(),
                name: "Warmup".to_string(),
                order: 1,
            },
        ];

        let text = render_tree(&build_taxonomy(&exercises));
        assert_eq!(text, "Scales\n  Major\n    Left hand [a]\nWarmup [b]\n");
    }
}
