use crate::error::{ScoreError, ScoreResult, ensure_finite};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Over,
    Under,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl FromStr for Side {
    type Err = ScoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "over" => Ok(Self::Over),
            "under" => Ok(Self::Under),
            _ => Err(ScoreError::InvalidSide(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Stat combination for combo props. Unknown labels fall back to an unweighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboType {
    Pra,
    Pr,
    Ra,
    Sum,
}

impl ComboType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pra => "PRA",
            Self::Pr => "PR",
            Self::Ra => "RA",
            Self::Sum => "SUM",
        }
    }

    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PRA" => Self::Pra,
            "PR" => Self::Pr,
            "RA" => Self::Ra,
            _ => Self::Sum,
        }
    }

    /// Weighted total of the box score line. Points carry the most weight.
    pub fn effective_total(self, points: f64, rebounds: f64, assists: f64) -> f64 {
        match self {
            Self::Pra => 1.2 * points + rebounds + 0.8 * assists,
            Self::Pr => 1.1 * points + 0.9 * rebounds,
            Self::Ra => 1.05 * rebounds + 0.95 * assists,
            Self::Sum => points + rebounds + assists,
        }
    }
}

impl fmt::Display for ComboType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComboType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComboType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

impl StatLine {
    pub fn new(points: f64, rebounds: f64, assists: f64) -> Self {
        Self {
            points,
            rebounds,
            assists,
        }
    }

    pub fn validate(&self) -> ScoreResult<()> {
        ensure_finite("points", self.points)?;
        ensure_finite("rebounds", self.rebounds)?;
        ensure_finite("assists", self.assists)?;
        Ok(())
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.points, self.rebounds, self.assists]
    }
}

/// A settled wager together with the numbers it was decided on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bet {
    Single {
        side: Side,
        line: f64,
        result: f64,
    },
    Combo {
        side: Side,
        combo: ComboType,
        line: f64,
        #[serde(flatten)]
        stats: StatLine,
    },
    Spread {
        spread: f64,
        team_score: i64,
        opp_score: i64,
    },
    Total {
        side: Side,
        line: f64,
        team_score: i64,
        opp_score: i64,
    },
    DoubleDouble {
        #[serde(flatten)]
        stats: StatLine,
    },
    TripleDouble {
        #[serde(flatten)]
        stats: StatLine,
    },
}

impl Bet {
    pub fn kind(&self) -> BetKind {
        match self {
            Self::Single { .. } => BetKind::Single,
            Self::Combo { .. } => BetKind::Combo,
            Self::Spread { .. } => BetKind::Spread,
            Self::Total { .. } => BetKind::Total,
            Self::DoubleDouble { .. } => BetKind::DoubleDouble,
            Self::TripleDouble { .. } => BetKind::TripleDouble,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    Single,
    Combo,
    Spread,
    Total,
    DoubleDouble,
    TripleDouble,
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single stat prop"),
            Self::Combo => write!(f, "Combo stat prop"),
            Self::Spread => write!(f, "Spread"),
            Self::Total => write!(f, "Game total"),
            Self::DoubleDouble => write!(f, "Double double"),
            Self::TripleDouble => write!(f, "Triple double"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_side_case_insensitively() {
        assert_eq!("Over".parse::<Side>(), Ok(Side::Over));
        assert_eq!("  UNDER ".parse::<Side>(), Ok(Side::Under));
        assert_eq!(
            "push".parse::<Side>(),
            Err(ScoreError::InvalidSide("push".to_string()))
        );
    }

    #[test]
    fn unknown_combo_falls_back_to_plain_sum() {
        assert_eq!(ComboType::parse_lenient("pra"), ComboType::Pra);
        assert_eq!(ComboType::parse_lenient("Pr"), ComboType::Pr);
        assert_eq!(ComboType::parse_lenient("ra"), ComboType::Ra);
        assert_eq!(ComboType::parse_lenient("PA"), ComboType::Sum);
        assert_eq!(ComboType::Sum.effective_total(10.0, 5.0, 3.0), 18.0);
    }

    #[test]
    fn weights_points_above_counting_stats() {
        let pra = ComboType::Pra.effective_total(10.0, 10.0, 10.0);
        assert!((pra - 30.0).abs() < 1e-9);
        let pr = ComboType::Pr.effective_total(20.0, 10.0, 99.0);
        assert!((pr - 31.0).abs() < 1e-9);
        let ra = ComboType::Ra.effective_total(99.0, 10.0, 10.0);
        assert!((ra - 20.0).abs() < 1e-9);
    }

    #[test]
    fn deserializes_tagged_bets() {
        let raw = r#"[
            {"kind": "single", "side": "Over", "line": 20.5, "result": 18},
            {"kind": "combo", "side": "under", "combo": "pr", "line": 30.5,
             "points": 25, "rebounds": 12, "assists": 4},
            {"kind": "spread", "spread": -3.5, "team_score": 101, "opp_score": 99},
            {"kind": "double_double", "points": 9, "rebounds": 9, "assists": 0}
        ]"#;
        let bets: Vec<Bet> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            bets,
            vec![
                Bet::Single {
                    side: Side::Over,
                    line: 20.5,
                    result: 18.0,
                },
                Bet::Combo {
                    side: Side::Under,
                    combo: ComboType::Pr,
                    line: 30.5,
                    stats: StatLine::new(25.0, 12.0, 4.0),
                },
                Bet::Spread {
                    spread: -3.5,
                    team_score: 101,
                    opp_score: 99,
                },
                Bet::DoubleDouble {
                    stats: StatLine::new(9.0, 9.0, 0.0),
                },
            ]
        );
        assert_eq!(bets[3].kind(), BetKind::DoubleDouble);
    }

    #[test]
    fn rejects_unknown_side_in_json() {
        let raw = r#"{"kind": "total", "side": "middle", "line": 220.5, "team_score": 110, "opp_score": 100}"#;
        let err = serde_json::from_str::<Bet>(raw).unwrap_err();
        assert!(err.to_string().contains("side must be 'over' or 'under'"));
    }
}
