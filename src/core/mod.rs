pub mod bet;
pub mod commentary;
pub mod report;
pub mod score;

use crate::core::bet::Bet;
use crate::core::report::ScoreReport;
use crate::core::score::{Tuning, evaluate};
use anyhow::{Context, Result};
use tracing::debug;

/// Scores every bet in a JSON array, failing on the first invalid record.
pub fn score_bets(content: &str, tuning: &Tuning) -> Result<Vec<ScoreReport>> {
    let bets: Vec<Bet> = serde_json::from_str(content).context("failed parsing bets json")?;
    debug!(count = bets.len(), "parsed bets");

    bets.into_iter()
        .enumerate()
        .map(|(idx, bet)| {
            let outcome = evaluate(&bet, tuning).with_context(|| format!("bet #{}", idx + 1))?;
            Ok(ScoreReport::new(bet, outcome))
        })
        .collect()
}
