//! adterm CLI: compare Attack-Defense Tree terms.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use adterm::config::{CompareConfig, Threshold};
use adterm::engine::{CompareEngine, ComparisonResult};
use adterm::term::{self, TermStats};

#[derive(Parser)]
#[command(name = "adterm", version, about = "Attack-Defense Tree term equivalence")]
struct Cli {
    /// TOML config file (threshold, normalize_unicode, max_depth, strict_parent_child).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Equivalence threshold in [0.0, 1.0]; overrides the config file.
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Reject leaves that match fuzzily only under a different gate symbol.
    #[arg(long, global = true)]
    strict_parent_child: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two ADTerms for structural equivalence.
    Compare {
        a: String,
        b: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare every pair in a JSON file.
    Batch {
        /// Path to JSON file with pairs: [{"a": "...", "b": "..."}, ...].
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Validate an ADTerm and report any syntax error.
    Check { term: String },

    /// Show node counts and depth of an ADTerm.
    Stats {
        term: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Deserialize)]
struct TermPair {
    a: String,
    b: String,
}

#[derive(Serialize)]
struct BatchEntry {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ComparisonResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CompareConfig::load(path)?,
        None => CompareConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.threshold = Threshold::new(threshold)?;
    }
    if cli.strict_parent_child {
        config.strict_parent_child = true;
    }

    match cli.command {
        Commands::Compare { a, b, json } => {
            let engine = CompareEngine::new(config);
            let result = engine.compare(&a, &b)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            if !result.equivalent {
                std::process::exit(1);
            }
        }

        Commands::Batch { file, json } => {
            let engine = CompareEngine::new(config);
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let pairs: Vec<TermPair> = serde_json::from_str(&content).into_diagnostic()?;
            let pairs: Vec<(String, String)> = pairs.into_iter().map(|p| (p.a, p.b)).collect();

            let entries: Vec<BatchEntry> = engine
                .compare_batch(&pairs)
                .into_iter()
                .enumerate()
                .map(|(index, outcome)| match outcome {
                    Ok(result) => BatchEntry {
                        index,
                        result: Some(result),
                        error: None,
                    },
                    Err(e) => BatchEntry {
                        index,
                        result: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&entries).into_diagnostic()?);
            } else {
                let equivalent = entries
                    .iter()
                    .filter(|e| e.result.is_some_and(|r| r.equivalent))
                    .count();
                for entry in &entries {
                    match (&entry.result, &entry.error) {
                        (Some(result), _) => println!("  {}. {result}", entry.index + 1),
                        (None, Some(error)) => println!("  {}. error: {error}", entry.index + 1),
                        (None, None) => {}
                    }
                }
                println!(
                    "{equivalent} of {} pairs equivalent ({})",
                    entries.len(),
                    file.display()
                );
            }
        }

        Commands::Check { term } => {
            term::validate(&term)?;
            println!("ok");
        }

        Commands::Stats { term, json } => {
            let stats = TermStats::from_term(&term)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
            } else {
                println!("{stats}");
            }
        }
    }

    Ok(())
}
