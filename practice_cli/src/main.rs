use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use practice_core::{
    aggregate_history, aggregate_progress,
    audit::audit,
    build_taxonomy,
    progress::best_record,
    store::{validate_record, RecordStore},
    RecordFilter, TempoRange,
};
use practice_schema::{Bpm, Dataset, MusicalKey, PracticeRecord, RecordSlot, Score, DEFAULT_TEMPO};
use tracing::info;

mod render;

#[derive(Debug, Parser)]
#[command(name = "practice")]
#[command(about = "Practice progress CLI", long_about = None)]
struct Cli {
    /// Raise log verbosity (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the exercise category tree
    Tree {
        dataset: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Scores for one key and tempo
    Progress {
        dataset: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long, default_value = "C")]
        key: MusicalKey,
        #[arg(short, long, default_value_t = DEFAULT_TEMPO)]
        tempo: Bpm,
    },
    /// Per-key, per-tempo rollup of every record
    History {
        dataset: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(long)]
        json: bool,
    },
    /// List data-quality issues
    Audit { dataset: PathBuf },
    /// Change stored records
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
}

#[derive(Debug, Subcommand)]
enum RecordAction {
    /// Score an exercise at a key and tempo
    Set {
        dataset: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        exercise: String,
        #[arg(short, long)]
        key: MusicalKey,
        #[arg(short, long)]
        tempo: Bpm,
        #[arg(short, long)]
        score: Score,
        /// Replace in one step instead of delete-then-insert
        #[arg(long)]
        atomic: bool,
    },
    /// Remove the record for an exercise at a key and tempo
    Clear {
        dataset: PathBuf,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        exercise: String,
        #[arg(short, long)]
        key: MusicalKey,
        #[arg(short, long)]
        tempo: Bpm,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Tree { dataset, json } => {
            let data = load(&dataset)?;
            let tree = build_taxonomy(&data.exercises);
            if json {
                let out = serde_json::to_string_pretty(&tree).context("failed to serialize tree")?;
                println!("{out}");
            } else {
                print!("{}", render::render_tree(&tree));
            }
        }
        Command::Progress {
            dataset,
            user,
            key,
            tempo,
        } => {
            let data = load(&dataset)?;
            let records = RecordFilter::for_user(user.as_str())
                .with_key(key)
                .with_tempo(tempo)
                .apply(&data.records);
            let summary = aggregate_progress(&data.exercises, &records);
            let best: Vec<Option<Score>> = data
                .exercises
                .iter()
                .map(|e| best_record(&records, &e.id, &user, key, tempo).map(|r| r.score))
                .collect();
            println!("{key} @ {tempo} bpm");
            print!("{}", render::render_progress(&data.exercises, &summary, &best));
        }
        Command::History {
            dataset,
            user,
            json,
        } => {
            let data = load(&dataset)?;
            let records = RecordStore::from_records(data.records).for_user(&user);
            let history = aggregate_history(&data.exercises, &records);
            let range = TempoRange::default();
            if json {
                let entries = render::history_entries(&history, &range);
                let out =
                    serde_json::to_string_pretty(&entries).context("failed to serialize history")?;
                println!("{out}");
            } else {
                print!("{}", render::render_history(&history, &range));
            }
        }
        Command::Audit { dataset } => {
            let data = load(&dataset)?;
            let issues = audit(&data);
            for issue in &issues {
                println!("{issue}");
            }
            println!("{} issue(s)", issues.len());
        }
        Command::Record { action } => run_record(action)?,
    }

    Ok(())
}

fn run_record(action: RecordAction) -> anyhow::Result<()> {
    match action {
        RecordAction::Set {
            dataset,
            user,
            exercise,
            key,
            tempo,
            score,
            atomic,
        } => {
            let mut data = load(&dataset)?;
            ensure_exercise(&data, &exercise)?;
            let record = PracticeRecord {
                exercise_id: exercise,
                user_id: user,
                key,
                tempo,
                score,
            };
            validate_record(&record, &TempoRange::default()).context("invalid record")?;

            let mut store = RecordStore::from_records(std::mem::take(&mut data.records));
            if atomic {
                store.upsert(record);
            } else {
                store.replace(record).context("failed to replace record")?;
            }
            data.records = store.into_records();
            practice_loader::save_dataset_to_path(&dataset, &data)?;
            info!(path = %dataset.display(), "record saved");
            println!("saved {key} @ {tempo} bpm: {score}");
        }
        RecordAction::Clear {
            dataset,
            user,
            exercise,
            key,
            tempo,
        } => {
            let mut data = load(&dataset)?;
            let mut store = RecordStore::from_records(std::mem::take(&mut data.records));
            let slot = RecordSlot {
                user_id: user,
                exercise_id: exercise,
                key,
                tempo,
            };
            let removed = store.delete(&slot).context("failed to clear record")?;
            data.records = store.into_records();
            practice_loader::save_dataset_to_path(&dataset, &data)?;
            let was = removed.iter().map(|r| r.score).max().unwrap_or_default();
            println!("cleared {key} @ {tempo} bpm (was {was})");
        }
    }
    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Dataset> {
    practice_loader::load_dataset_from_path(path)
        .with_context(|| format!("load failed: {}", path.display()))
}

fn ensure_exercise(data: &Dataset, exercise_id: &str) -> anyhow::Result<()> {
    if data.exercises.iter().any(|e| e.id == exercise_id) {
        return Ok(());
    }
    bail!("unknown exercise: {exercise_id}")
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::prelude::*;

    let default_level = if verbose > 0 { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
