use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thermo_quiz::progress::ProgressStore;
use thermo_quiz::{Quiz, DEFAULT_SAMPLE_SIZE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with question pools (defaults to the built-in set)
    #[arg(short, long)]
    pools: Option<PathBuf>,

    /// File the per-topic progress counters are stored in
    #[arg(long, default_value = "progress.json")]
    progress: PathBuf,

    /// Questions drawn per topic and round
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Seed for reproducible question sampling
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let store = ProgressStore::new(args.progress);

    let quiz = match args.pools {
        Some(path) => Quiz::from_json(path, store, args.sample_size, rng),
        None => Quiz::with_default_pools(store, args.sample_size, rng),
    };
    let quiz = quiz.expect("Failed to load question pools");

    if let Err(e) = quiz.run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
