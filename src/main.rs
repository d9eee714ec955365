mod cli;
mod config;
mod core;
mod error;
mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use config::Config;
use core::bet::{Bet, ComboType, StatLine};
use core::report::{self, BatchSummary, JsonBatch, ScoreReport};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_env("HOWBAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Single(args) => {
            let bet = Bet::Single {
                side: args.side.parse()?,
                line: args.line,
                result: args.result,
            };
            score_one(bet, &args.run)
        }
        Commands::Combo(args) => {
            let bet = Bet::Combo {
                side: args.side.parse()?,
                combo: ComboType::parse_lenient(&args.combo),
                line: args.line,
                stats: stat_line(&args.stats),
            };
            score_one(bet, &args.stats.run)
        }
        Commands::Spread(args) => {
            let bet = Bet::Spread {
                spread: args.spread,
                team_score: args.team,
                opp_score: args.opp,
            };
            score_one(bet, &args.run)
        }
        Commands::Total(args) => {
            let bet = Bet::Total {
                side: args.side.parse()?,
                line: args.line,
                team_score: args.team,
                opp_score: args.opp,
            };
            score_one(bet, &args.run)
        }
        Commands::DoubleDouble(args) => {
            let bet = Bet::DoubleDouble {
                stats: stat_line(&args),
            };
            score_one(bet, &args.run)
        }
        Commands::TripleDouble(args) => {
            let bet = Bet::TripleDouble {
                stats: stat_line(&args),
            };
            score_one(bet, &args.run)
        }
        Commands::Batch(args) => score_batch(&args.file, &args.run),
        Commands::Menu(args) => {
            let cfg = load(args.config.as_deref())?;
            let stdin = io::stdin();
            menu::Menu::new(stdin.lock(), io::stdout(), cfg.tuning()).run()?;
            Ok(0)
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn load(config_path: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(config_path, &cwd)?;
    if !loaded.config.general.color {
        colored::control::set_override(false);
    }
    Ok(loaded.config)
}

fn stat_line(args: &cli::StatArgs) -> StatLine {
    StatLine::new(args.points, args.rebounds, args.assists)
}

fn score_one(bet: Bet, args: &RunArgs) -> Result<i32> {
    let cfg = load(args.config.as_deref())?;
    let outcome = core::score::evaluate(&bet, &cfg.tuning())?;
    info!(kind = %bet.kind(), score = ?outcome.score(), "scored bet");
    let report = ScoreReport::new(bet, outcome);

    if args.json || cfg.general.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_human(&report)?;
    }

    Ok(0)
}

fn score_batch(file: &Path, args: &RunArgs) -> Result<i32> {
    let cfg = load(args.config.as_deref())?;
    let content =
        fs::read_to_string(file).with_context(|| format!("failed reading {}", file.display()))?;
    let reports = core::score_bets(&content, &cfg.tuning())
        .with_context(|| format!("failed scoring bets in {}", file.display()))?;
    let summary = BatchSummary::from_reports(&reports);
    info!(total = summary.total, losses = summary.losses, "scored batch");

    if args.json || cfg.general.json {
        let batch = JsonBatch {
            summary,
            bets: &reports,
        };
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        report::print_batch_human(&reports, &summary)?;
    }

    Ok(0)
}
