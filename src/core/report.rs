use crate::core::bet::{Bet, BetKind};
use crate::core::commentary::{self, Remark};
use crate::core::score::Outcome;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreReport {
    pub kind: BetKind,
    pub bet: Bet,
    pub lost: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<Remark>,
    pub comment: String,
}

impl ScoreReport {
    pub fn new(bet: Bet, outcome: Outcome) -> Self {
        let score = outcome.score();
        Self {
            kind: bet.kind(),
            bet,
            lost: outcome.is_loss(),
            score,
            remark: score.map(Remark::for_score),
            comment: commentary::comment(outcome).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub losses: usize,
    pub not_losses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_score: Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[ScoreReport]) -> Self {
        let scores: Vec<f64> = reports.iter().filter_map(|report| report.score).collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            total: reports.len(),
            losses: scores.len(),
            not_losses: reports.len() - scores.len(),
            mean_score,
            worst_score: scores.iter().copied().reduce(f64::min),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonBatch<'a> {
    pub summary: BatchSummary,
    pub bets: &'a [ScoreReport],
}

fn colored_remark(remark: Remark) -> String {
    let text = remark.text();
    match remark {
        Remark::RazorThin | Remark::VeryClose => text.green().bold().to_string(),
        Remark::DecentRead => text.cyan().to_string(),
        Remark::PrettyBad => text.yellow().to_string(),
        Remark::Ugly | Remark::Disaster => text.red().bold().to_string(),
    }
}

pub fn write_human<W: Write>(out: &mut W, report: &ScoreReport) -> io::Result<()> {
    match (report.score, report.remark) {
        (Some(score), Some(remark)) => {
            writeln!(out, "Score: {:.1} out of 100.", score)?;
            writeln!(out, "Comment: {}", colored_remark(remark))?;
        }
        _ => writeln!(out, "{}", report.comment.dimmed())?,
    }
    Ok(())
}

pub fn print_human(report: &ScoreReport) -> io::Result<()> {
    write_human(&mut io::stdout().lock(), report)
}

pub fn print_batch_human(reports: &[ScoreReport], summary: &BatchSummary) -> io::Result<()> {
    let mut out = io::stdout().lock();

    for (idx, report) in reports.iter().enumerate() {
        writeln!(out, "{}", format!("#{} {}", idx + 1, report.kind).bold())?;
        write_human(&mut out, report)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "bets: {} (lost: {}, not lost: {})",
        summary.total, summary.losses, summary.not_losses
    )?;
    if let (Some(mean), Some(worst)) = (summary.mean_score, summary.worst_score) {
        writeln!(out, "mean score: {:.1}, worst: {:.1}", mean, worst)?;
    }
    Ok(())
}
