//! Synthesize the labeled spoilage dataset and write it to CSV.
//!
//! Usage: generate_dataset [--rows N] [--seed S] [--out PATH]

use freshness_predictor::dataset::{
    generate_dataset, write_csv, DEFAULT_DATA_CSV, DEFAULT_ROWS, DEFAULT_SEED,
};
use freshness_predictor::vocab::FreshnessLevel;
use std::path::PathBuf;

struct Args {
    rows: usize,
    seed: u64,
    out: PathBuf,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        rows: DEFAULT_ROWS,
        seed: DEFAULT_SEED,
        out: PathBuf::from(DEFAULT_DATA_CSV),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" | "-n" => {
                if i + 1 < args.len() {
                    parsed.rows = args[i + 1].parse().unwrap_or(DEFAULT_ROWS);
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    parsed.seed = args[i + 1].parse().unwrap_or(DEFAULT_SEED);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    parsed.out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: generate_dataset [--rows N] [--seed S] [--out PATH]\n\
                     Defaults: --rows {} --seed {} --out {}",
                    DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_DATA_CSV
                );
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    parsed
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args();

    println!("{}", "=".repeat(80));
    println!("SYNTHETIC DATASET GENERATION");
    println!("{}", "=".repeat(80));
    println!("\nRows: {} | Seed: {}", args.rows, args.seed);

    let samples = generate_dataset(args.rows, args.seed);

    println!("\nLabel distribution:");
    for level in FreshnessLevel::ALL {
        let count = samples.iter().filter(|s| s.freshness_level == level).count();
        println!(
            "  {:<8} {:>6}  ({:.1}%)",
            level,
            count,
            100.0 * count as f64 / samples.len() as f64
        );
    }

    write_csv(&args.out, &samples)?;
    println!("\nDataset saved to {:?}", args.out);

    Ok(())
}
