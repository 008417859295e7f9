//! Write a brief summary of the saved model's top feature importances.
//!
//! Usage: model_summary [--model PATH] [--out PATH] [--top N]

use anyhow::Context;
use freshness_predictor::prediction::load_model;
use freshness_predictor::report::importance_summary;
use freshness_predictor::training::DEFAULT_MODEL_PATH;
use std::fs;
use std::path::PathBuf;

const DEFAULT_SUMMARY_PATH: &str = "reports/model_summary.txt";

struct Args {
    model: PathBuf,
    out: PathBuf,
    top: usize,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        model: PathBuf::from(DEFAULT_MODEL_PATH),
        out: PathBuf::from(DEFAULT_SUMMARY_PATH),
        top: 10,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--model" | "-m" => {
                if i + 1 < args.len() {
                    parsed.model = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    parsed.out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--top" | "-t" => {
                if i + 1 < args.len() {
                    parsed.top = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: model_summary [--model PATH] [--out PATH] [--top N]");
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

    let model = load_model(&args.model)?;

    let names = model.encoder.feature_names();
    let summary = importance_summary(&names, model.forest.feature_importances(), args.top);

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }
    fs::write(&args.out, &summary)
        .with_context(|| format!("Failed to write summary: {:?}", args.out))?;

    println!("{}", summary);
    println!("Model summary written to {:?}", args.out);

    Ok(())
}
