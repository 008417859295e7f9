//! Train the freshness classifier and write its artifacts.
//!
//! Usage: train_model [--data PATH] [--model-out PATH] [--report-out PATH]
//!                    [--json-out PATH] [--trees N] [--seed S]
//!                    [--train-ratio R]

use freshness_predictor::training::{train_and_save, TrainingConfig};
use std::path::PathBuf;
use std::time::Instant;

fn parse_args() -> TrainingConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = TrainingConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    config.data_csv = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--model-out" | "-m" => {
                if i + 1 < args.len() {
                    config.model_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--report-out" | "-r" => {
                if i + 1 < args.len() {
                    config.report_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--json-out" | "-j" => {
                if i + 1 < args.len() {
                    config.report_json_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--trees" | "-t" => {
                if i + 1 < args.len() {
                    config.forest.n_trees = args[i + 1].parse().unwrap_or(config.forest.n_trees);
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    let seed = args[i + 1].parse().unwrap_or(config.forest.seed);
                    config.forest.seed = seed;
                    config.split_seed = seed;
                    i += 1;
                }
            }
            "--train-ratio" => {
                if i + 1 < args.len() {
                    config.train_ratio = args[i + 1]
                        .parse::<f64>()
                        .unwrap_or(config.train_ratio)
                        .clamp(0.5, 0.95);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: train_model [--data PATH] [--model-out PATH] \
                     [--report-out PATH] [--json-out PATH] [--trees N] \
                     [--seed S] [--train-ratio R]"
                );
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = parse_args();

    println!("{}", "=".repeat(80));
    println!("FRESHNESS MODEL TRAINING");
    println!("{}", "=".repeat(80));
    println!(
        "\nData: {:?} | Trees: {} | Seed: {} | Train ratio: {:.0}%",
        config.data_csv,
        config.forest.n_trees,
        config.forest.seed,
        config.train_ratio * 100.0
    );

    let start = Instant::now();
    let summary = train_and_save(&config)?;

    println!(
        "\nTrain: {} rows | Test: {} rows | Fit+eval time: {:.2}s",
        summary.n_train,
        summary.n_test,
        start.elapsed().as_secs_f64()
    );
    println!("\n{}", summary.report.to_text());
    println!("Model saved to {:?}", config.model_path);
    println!("Report saved to {:?}", config.report_path);

    Ok(())
}
