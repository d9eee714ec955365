//! Closeness scoring for losing bets.
//!
//! Every scorer first settles the bet. Anything that won or pushed yields
//! [`Outcome::NotALoss`]; a loss yields a score clamped to `0..=100`, where
//! 100 means the bet missed by the thinnest possible margin.

use crate::core::bet::{Bet, ComboType, Side, StatLine};
use crate::error::{ScoreResult, ensure_finite};
use tracing::debug;

const MILESTONE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    NotALoss,
    Score(f64),
}

impl Outcome {
    pub fn score(self) -> Option<f64> {
        match self {
            Self::NotALoss => None,
            Self::Score(value) => Some(value),
        }
    }

    pub fn is_loss(self) -> bool {
        matches!(self, Self::Score(_))
    }
}

/// Curve parameters for the ratio and margin scorers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub prop_alpha: f64,
    pub combo_alpha: f64,
    pub spread: MarginCurve,
    pub total: MarginCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            prop_alpha: 2.0,
            combo_alpha: 2.0,
            spread: MarginCurve {
                distance: 10.0,
                exponent: 1.2,
            },
            total: MarginCurve {
                distance: 14.0,
                exponent: 1.0,
            },
        }
    }
}

/// Decay over a window of `distance` points: `100 * (1 - min(diff / distance, 1)^exponent)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginCurve {
    pub distance: f64,
    pub exponent: f64,
}

impl MarginCurve {
    fn apply(self, diff: f64) -> f64 {
        let x = (diff / self.distance).min(1.0);
        clamp(100.0 * (1.0 - x.powf(self.exponent)))
    }
}

pub fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

pub fn evaluate(bet: &Bet, tuning: &Tuning) -> ScoreResult<Outcome> {
    match bet {
        Bet::Single { side, line, result } => {
            score_single_stat(*side, *line, *result, tuning.prop_alpha)
        }
        Bet::Combo {
            side,
            combo,
            line,
            stats,
        } => score_combo(*side, *combo, *line, stats, tuning.combo_alpha),
        Bet::Spread {
            spread,
            team_score,
            opp_score,
        } => score_spread(*spread, *team_score, *opp_score, tuning.spread),
        Bet::Total {
            side,
            line,
            team_score,
            opp_score,
        } => score_total(*side, *line, *team_score, *opp_score, tuning.total),
        Bet::DoubleDouble { stats } => score_double_double(stats),
        Bet::TripleDouble { stats } => score_triple_double(stats),
    }
}

pub fn score_single_stat(side: Side, line: f64, result: f64, alpha: f64) -> ScoreResult<Outcome> {
    let line = ensure_finite("line", line)?;
    let result = ensure_finite("result", result)?;
    Ok(ratio_score(side, line, result, alpha))
}

pub fn score_combo(
    side: Side,
    combo: ComboType,
    line: f64,
    stats: &StatLine,
    alpha: f64,
) -> ScoreResult<Outcome> {
    let line = ensure_finite("line", line)?;
    stats.validate()?;

    let effective = combo.effective_total(stats.points, stats.rebounds, stats.assists);
    debug!(combo = %combo, effective, line, "combo effective total");
    Ok(ratio_score(side, line, effective, alpha))
}

// Shared by single and combo props: score = 100 * ratio^alpha where ratio is
// actual over needed (over) or needed over actual (under).
fn ratio_score(side: Side, line: f64, actual: f64, alpha: f64) -> Outcome {
    let lost = match side {
        Side::Over => actual < line,
        Side::Under => actual > line,
    };
    if !lost {
        debug!(%side, line, actual, "prop did not lose");
        return Outcome::NotALoss;
    }

    let ratio = match side {
        Side::Over if line > 0.0 => actual / line,
        Side::Under if actual > 0.0 => line / actual,
        _ => 0.0,
    };
    let ratio = ratio.max(0.0);
    debug!(%side, line, actual, ratio, "prop lost");

    Outcome::Score(clamp(100.0 * ratio.powf(alpha)))
}

pub fn score_spread(
    spread: f64,
    team_score: i64,
    opp_score: i64,
    curve: MarginCurve,
) -> ScoreResult<Outcome> {
    let spread = ensure_finite("spread", spread)?;
    let margin = team_score as f64 - opp_score as f64;
    let cover_margin = margin + spread;

    if cover_margin >= 0.0 {
        debug!(spread, margin, cover_margin, "spread covered or pushed");
        return Ok(Outcome::NotALoss);
    }

    let diff = -cover_margin;
    debug!(spread, margin, diff, "spread missed");
    Ok(Outcome::Score(curve.apply(diff)))
}

pub fn score_total(
    side: Side,
    total_line: f64,
    team_score: i64,
    opp_score: i64,
    curve: MarginCurve,
) -> ScoreResult<Outcome> {
    let total_line = ensure_finite("line", total_line)?;
    let total = team_score as f64 + opp_score as f64;

    let diff = match side {
        Side::Over if total < total_line => total_line - total,
        Side::Under if total > total_line => total - total_line,
        _ => {
            debug!(%side, total, total_line, "total did not lose");
            return Ok(Outcome::NotALoss);
        }
    };

    debug!(%side, total, total_line, diff, "total missed");
    Ok(Outcome::Score(curve.apply(diff)))
}

/// Scores a "yes" double double that fell short.
///
/// The blend is keyed on how close the second best category got, with
/// hand calibrated constants per tier.
pub fn score_double_double(stats: &StatLine) -> ScoreResult<Outcome> {
    stats.validate()?;

    let made = stats
        .as_array()
        .iter()
        .filter(|value| **value >= MILESTONE)
        .count();
    if made >= 2 {
        debug!(made, "double double hit");
        return Ok(Outcome::NotALoss);
    }

    let [s1, s2, s3] = sorted_fractions(stats);
    let base_score = 100.0 * ((s1 + s2) / 2.0).powi(2);

    let score = if s2 >= 0.9 {
        base_score + 4.46 * s3 + 3.662
    } else if s2 >= 0.8 {
        0.65 * base_score + 10.0 * s3
    } else {
        0.4 * base_score + 5.0 * s3
    };
    debug!(s1, s2, s3, base_score, score, "double double missed");

    Ok(Outcome::Score(clamp(score)))
}

/// Scores a "yes" triple double that fell short.
///
/// Rules are checked in order and the first match wins.
pub fn score_triple_double(stats: &StatLine) -> ScoreResult<Outcome> {
    stats.validate()?;

    if stats.as_array().iter().all(|value| *value >= MILESTONE) {
        debug!("triple double hit");
        return Ok(Outcome::NotALoss);
    }

    let fractions = sorted_fractions(stats);
    let [_, _, s3] = fractions;
    let hits = count_at_least(&fractions, 1.0);
    let nears = count_at_least(&fractions, 0.9);
    let base = fractions.iter().sum::<f64>() / 3.0;
    let base_score = 100.0 * base.powi(2);

    let score = if hits >= 2 && s3 >= 0.9 {
        0.9 * base_score + 14.0
    } else if hits == 0 && nears == 3 {
        0.68 * base_score
    } else if hits == 1 && nears == 3 {
        0.75 * base_score
    } else if hits >= 2 {
        1.223137585 * base_score - 51.038
    } else if count_at_least(&fractions, 0.6) >= 2 {
        0.5 * base_score - 10.0
    } else {
        0.25 * base_score
    };
    debug!(hits, nears, base_score, score, "triple double missed");

    Ok(Outcome::Score(clamp(score)))
}

// Fraction of the 10-unit milestone per category, capped at 1, best first.
fn sorted_fractions(stats: &StatLine) -> [f64; 3] {
    let mut fractions = stats
        .as_array()
        .map(|value| (value / MILESTONE).clamp(0.0, 1.0));
    fractions.sort_by(|a, b| b.total_cmp(a));
    fractions
}

fn count_at_least(fractions: &[f64; 3], threshold: f64) -> usize {
    fractions.iter().filter(|value| **value >= threshold).count()
}
