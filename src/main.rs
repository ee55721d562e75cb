//! risk_sim - runs batches of simulated territory-conquest matches and
//! reports what the strategies did.

use chrono::Utc;
use clap::{Parser, ValueEnum};
use risk_sim::batch::{run_batch, BatchSummary};
use risk_sim::error::{ConfigError, GameError};
use risk_sim::game_config::GameConfig;
use risk_sim::player::PlayerCounter;
use risk_sim::strategies::StrategyKind;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "risk_sim")]
#[command(about = "Run batches of territory-conquest matches between scripted strategies")]
struct Args {
    /// JSON match configuration (players, map, limits)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Strategies to seat on the standard map when no config is given
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [StrategyKind::Aggressive, StrategyKind::Defensive, StrategyKind::Balanced])]
    players: Vec<StrategyKind>,

    /// Number of matches to play
    #[arg(long, short = 'n', default_value_t = 100)]
    trials: u64,

    /// Number of independent games run in parallel
    #[arg(long, short = 'w', default_value_t = 4)]
    workers: usize,

    /// Round cap, overrides the config
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Base seed for reproducible batches, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("could not encode report: {0}")]
    Report(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    seed: Option<u64>,
    #[serde(flatten)]
    summary: &'a BatchSummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("risk_sim=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "batch failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::with_strategies(&args.players),
    };
    if let Some(max_rounds) = args.max_rounds {
        config.max_rounds = max_rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    tracing::info!(
        players = config.players.len(),
        trials = args.trials,
        workers = args.workers,
        "starting batch"
    );
    let summary = run_batch(args.trials, args.workers, |worker| {
        config.to_game(worker).map_err(CliError::from)
    })?;

    match args.format {
        Format::Json => {
            let report = Report {
                generated_at: Utc::now().to_rfc3339(),
                seed: config.seed,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Text => print_table(&summary),
    }
    Ok(())
}

fn print_table(summary: &BatchSummary) {
    let matches = &summary.matches;
    println!("=== risk_sim {} ===", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "{} matches on {} workers, {} ties",
        matches.matches, summary.workers, matches.ties
    );
    println!(
        "rounds: min {}, max {}, average {:.1}",
        matches.min_rounds.unwrap_or(0),
        matches.max_rounds,
        matches.average_rounds()
    );
    println!();

    print!("{:<20}", "counter");
    for player in &summary.players {
        print!(" {:>14}", player.name);
    }
    println!();
    print!("{:<20}", "strategy");
    for player in &summary.players {
        print!(" {:>14}", player.strategy);
    }
    println!();
    for counter in PlayerCounter::ALL {
        print!("{:<20}", counter.label());
        for player in &summary.players {
            print!(" {:>14}", player.stats.get(counter));
        }
        println!();
    }
}
