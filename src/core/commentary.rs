use crate::core::score::Outcome;
use serde::Serialize;

pub const NOT_A_LOSS: &str = "This bet did not lose. No score needed.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    RazorThin,
    VeryClose,
    DecentRead,
    PrettyBad,
    Ugly,
    Disaster,
}

impl Remark {
    pub fn for_score(score: f64) -> Self {
        if score >= 95.0 {
            Self::RazorThin
        } else if score >= 80.0 {
            Self::VeryClose
        } else if score >= 60.0 {
            Self::DecentRead
        } else if score >= 30.0 {
            Self::PrettyBad
        } else if score >= 10.0 {
            Self::Ugly
        } else {
            Self::Disaster
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::RazorThin => "Pure heartbreak. This was a razor thin miss.",
            Self::VeryClose => "Very close. Right side, bad variance.",
            Self::DecentRead => "Decent read, but not a sweat at the end.",
            Self::PrettyBad => "Pretty bad. This one was never really alive.",
            Self::Ugly => "Ugly. Candidate for pinhead of the night.",
            Self::Disaster => "Complete disaster. Burn this ticket.",
        }
    }
}

pub fn comment(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::NotALoss => NOT_A_LOSS,
        Outcome::Score(score) => Remark::for_score(score).text(),
    }
}
