use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dataset = practice_loader::load_dataset_from_path(args.path)?;
    println!("exercises={}", dataset.exercises.len());
    println!("records={}", dataset.records.len());
    if let Some(first) = dataset.exercises.first() {
        println!("first={}", first.name);
    }
    Ok(())
}
