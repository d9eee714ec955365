//! Line-oriented interactive front end.

use crate::core::bet::{Bet, ComboType, StatLine};
use crate::core::report::{ScoreReport, write_human};
use crate::core::score::{Tuning, evaluate};
use anyhow::{Context, Result, anyhow};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const MENU: &str = "
NBA Bad Bet Scorer
Choose bet type:
1. Single stat over or under (points, rebounds, assists, 3PM, blocks, steals)
2. Combo stat over or under (PRA, PR, RA)
3. Spread bet
4. Game total over or under
5. Double double (Yes) that lost
6. Triple double (Yes) that lost
0. Quit";

pub const FAREWELL: &str = "Good luck on the next card.";

pub struct Menu<R, W> {
    input: R,
    output: W,
    tuning: Tuning,
}

enum Step {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, tuning: Tuning) -> Self {
        Self {
            input,
            output,
            tuning,
        }
    }

    /// Runs until the user picks 0 or input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice number: ")? else {
                return Ok(());
            };

            match self.handle_choice(choice.as_str()) {
                Ok(Step::Continue) => {}
                Ok(Step::Quit) => {
                    writeln!(self.output, "{FAREWELL}")?;
                    return Ok(());
                }
                Err(err) if err.is::<EndOfInput>() => return Ok(()),
                Err(err) => {
                    debug!(error = %err, "rejected menu input");
                    writeln!(self.output, "Invalid input: {err:#}")?;
                }
            }
        }
    }

    fn handle_choice(&mut self, choice: &str) -> Result<Step> {
        let bet = match choice {
            "0" => return Ok(Step::Quit),
            "1" => Bet::Single {
                side: self.ask("Over or Under? ")?,
                line: self.ask("Betting line (e.g. 20.5): ")?,
                result: self.ask("Actual stat result: ")?,
            },
            "2" => {
                let side = self.ask("Over or Under? ")?;
                let combo = self.ask_line("Combo type (PRA, PR, RA): ")?;
                let combo = ComboType::parse_lenient(&combo);
                let line = self.ask("Betting line (e.g. 31.5): ")?;
                Bet::Combo {
                    side,
                    combo,
                    line,
                    stats: self.ask_stats()?,
                }
            }
            "3" => Bet::Spread {
                spread: self.ask("Spread you bet (use sign, e.g. +4.5 or -3.5): ")?,
                team_score: self.ask("Your team final score: ")?,
                opp_score: self.ask("Opponent final score: ")?,
            },
            "4" => Bet::Total {
                side: self.ask("Over or Under? ")?,
                line: self.ask("Total line (e.g. 220.5): ")?,
                team_score: self.ask("Home or chosen team score: ")?,
                opp_score: self.ask("Opponent score: ")?,
            },
            "5" => Bet::DoubleDouble {
                stats: self.ask_stats()?,
            },
            "6" => Bet::TripleDouble {
                stats: self.ask_stats()?,
            },
            _ => {
                writeln!(self.output, "Invalid choice. Try again.")?;
                return Ok(Step::Continue);
            }
        };

        debug!(?bet, "scoring bet from menu");
        let outcome = evaluate(&bet, &self.tuning)?;
        writeln!(self.output)?;
        write_human(&mut self.output, &ScoreReport::new(bet, outcome))?;
        Ok(Step::Continue)
    }

    fn ask_stats(&mut self) -> Result<StatLine> {
        Ok(StatLine::new(
            self.ask("Points: ")?,
            self.ask("Rebounds: ")?,
            self.ask("Assists: ")?,
        ))
    }

    fn ask<T>(&mut self, label: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self.ask_line(label)?;
        raw.parse::<T>()
            .with_context(|| format!("could not read '{raw}' for \"{}\"", label.trim()))
    }

    fn ask_line(&mut self, label: &str) -> Result<String> {
        self.prompt(label)?.ok_or_else(|| anyhow!(EndOfInput))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("input ended")]
struct EndOfInput;

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Menu::new(script.as_bytes(), &mut out, Tuning::default())
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scores_a_single_stat_and_quits() {
        let out = run_script("1\nover\n20\n10\n0\n");
        assert!(out.contains("Score: 25.0 out of 100."));
        assert!(out.contains("Comment: Ugly. Candidate for pinhead of the night."));
        assert!(out.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn reports_bets_that_did_not_lose() {
        let out = run_script("3\n+4.5\n108\n110\n0\n");
        assert!(out.contains("This bet did not lose. No score needed."));
        assert!(!out.contains("Score:"));
    }

    #[test]
    fn recovers_from_bad_side_and_bad_numbers() {
        let out = run_script("1\nsideways\n4\nover\nabc\n9\n");
        assert!(out.contains("side must be 'over' or 'under'"));
        assert!(out.contains("could not read 'abc'"));
        assert!(!out.contains(FAREWELL));
    }

    #[test]
    fn rejects_unknown_choice() {
        let out = run_script("7\n0\n");
        assert!(out.contains("Invalid choice. Try again."));
    }

    #[test]
    fn stops_quietly_when_input_ends_mid_bet() {
        let out = run_script("5\n9\n");
        assert!(out.contains("Rebounds: "));
        assert!(!out.contains("Invalid input"));
    }

    #[test]
    fn scores_milestone_bets() {
        let out = run_script("5\n9\n9\n0\n6\n15\n15\n8\n0\n");
        assert!(out.contains("Score: 84.7 out of 100."));
        assert!(out.contains("Score: 55.5 out of 100."));
    }
}
