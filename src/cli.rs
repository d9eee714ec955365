use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "howbad",
    version,
    about = "Scores how close a losing NBA bet came to cashing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Single stat over/under (points, rebounds, assists, 3PM, blocks, steals)
    Single(SingleArgs),
    /// Combo stat over/under (PRA, PR, RA)
    Combo(ComboArgs),
    /// Point spread
    Spread(SpreadArgs),
    /// Game total over/under
    Total(TotalArgs),
    /// "Yes" double double that lost
    DoubleDouble(StatArgs),
    /// "Yes" triple double that lost
    TripleDouble(StatArgs),
    /// Score a JSON array of bets
    Batch(BatchArgs),
    /// Interactive menu
    Menu(MenuArgs),
    /// Write a default howbad.toml in the current directory
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct MenuArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SingleArgs {
    #[arg(long)]
    pub side: String,
    #[arg(long, allow_negative_numbers = true)]
    pub line: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub result: f64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ComboArgs {
    #[arg(long)]
    pub side: String,
    #[arg(long, default_value = "PRA")]
    pub combo: String,
    #[arg(long, allow_negative_numbers = true)]
    pub line: f64,
    #[command(flatten)]
    pub stats: StatArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SpreadArgs {
    /// Signed spread on your side, e.g. +4.5 or -3.5
    #[arg(long, allow_negative_numbers = true)]
    pub spread: f64,
    #[arg(long)]
    pub team: i64,
    #[arg(long)]
    pub opp: i64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TotalArgs {
    #[arg(long)]
    pub side: String,
    #[arg(long)]
    pub line: f64,
    #[arg(long)]
    pub team: i64,
    #[arg(long)]
    pub opp: i64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct StatArgs {
    #[arg(long, default_value_t = 0.0)]
    pub points: f64,
    #[arg(long, default_value_t = 0.0)]
    pub rebounds: f64,
    #[arg(long, default_value_t = 0.0)]
    pub assists: f64,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub run: RunArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_spread() {
        let cli = Cli::try_parse_from([
            "howbad", "spread", "--spread", "-3.5", "--team", "101", "--opp", "99",
        ])
        .unwrap();
        match cli.command {
            Commands::Spread(args) => {
                assert_eq!(args.spread, -3.5);
                assert_eq!(args.team, 101);
                assert!(!args.run.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn combo_stats_are_flattened() {
        let cli = Cli::try_parse_from([
            "howbad", "combo", "--side", "over", "--combo", "pr", "--line", "30.5",
            "--points", "22", "--rebounds", "7", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Combo(args) => {
                assert_eq!(args.combo, "pr");
                assert_eq!(args.stats.points, 22.0);
                assert_eq!(args.stats.assists, 0.0);
                assert!(args.stats.run.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn menu_takes_no_json_flag() {
        let cli = Cli::try_parse_from(["howbad", "menu", "--config", "alt.toml"]).unwrap();
        match cli.command {
            Commands::Menu(args) => assert_eq!(args.config, Some(PathBuf::from("alt.toml"))),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["howbad", "menu", "--json"]).is_err());
    }

    #[test]
    fn verifies_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
