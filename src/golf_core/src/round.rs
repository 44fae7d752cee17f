use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_TOP_X, MAX_TOP_X, MIN_TOP_X};
use crate::course::validate_stroke_index;
use crate::error::{GolfError, Result};
use crate::json::{de_number, de_number_or_zero};

/// Round format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Format {
    /// One shared team score per hole
    Scramble,
    /// Individual scores aggregated per team
    Shamble,
    #[default]
    Singles,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Scramble => "scramble",
            Format::Shamble => "shamble",
            Format::Singles => "singles",
        }
    }
}

impl From<&str> for Format {
    /// Unknown formats fall back to singles.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "scramble" => Format::Scramble,
            "shamble" => Format::Shamble,
            _ => Format::Singles,
        }
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format::from(s.as_str())
    }
}

impl From<Format> for String {
    fn from(f: Format) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the counted player scores combine into a team score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Sum,
    Avg,
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregationMode::Sum),
            "avg" | "average" => Ok(AggregationMode::Avg),
            other => Err(format!("unknown aggregation mode: {}", other)),
        }
    }
}

/// Team aggregation settings for non-scramble rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTeamAggregation", rename_all = "camelCase")]
pub struct TeamAggregation {
    pub mode: AggregationMode,
    /// Number of best player scores counted, always within 1..=4
    pub top_x: u32,
}

/// Zero or a missing value means the default; anything else is floored
/// and clamped into 1..=4.
fn clamp_top_x(top_x: Option<f64>) -> u32 {
    match top_x.filter(|v| v.is_finite() && *v != 0.0) {
        None => DEFAULT_TOP_X,
        Some(v) => v.floor().clamp(MIN_TOP_X as f64, MAX_TOP_X as f64) as u32,
    }
}

impl TeamAggregation {
    /// Create settings with `top_x` clamped into 1..=4 (0 selects 4).
    pub fn new(mode: AggregationMode, top_x: i64) -> Self {
        TeamAggregation {
            mode,
            top_x: clamp_top_x(Some(top_x as f64)),
        }
    }
}

impl Default for TeamAggregation {
    fn default() -> Self {
        TeamAggregation {
            mode: AggregationMode::Sum,
            top_x: DEFAULT_TOP_X,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTeamAggregation {
    #[serde(default)]
    mode: AggregationMode,
    #[serde(default, deserialize_with = "de_number")]
    top_x: Option<f64>,
}

impl From<RawTeamAggregation> for TeamAggregation {
    fn from(raw: RawTeamAggregation) -> Self {
        TeamAggregation {
            mode: raw.mode,
            top_x: clamp_top_x(raw.top_x),
        }
    }
}

fn default_round_name() -> String {
    "Round".to_string()
}

/// A tournament round definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    #[serde(default = "default_round_name")]
    pub name: String,

    #[serde(default)]
    pub format: Format,

    #[serde(default)]
    pub use_handicap: bool,

    /// Contribution to the all-rounds leaderboard; rounds with weight <= 0 are excluded
    #[serde(default, deserialize_with = "de_number_or_zero")]
    pub weight: f64,

    #[serde(default)]
    pub team_aggregation: TeamAggregation,
}

impl Round {
    pub fn new(name: &str, format: Format, use_handicap: bool, weight: f64) -> Self {
        Round {
            name: if name.trim().is_empty() {
                default_round_name()
            } else {
                name.trim().to_string()
            },
            format,
            use_handicap,
            weight,
            team_aggregation: TeamAggregation::default(),
        }
    }

    pub fn with_aggregation(mut self, aggregation: TeamAggregation) -> Self {
        self.team_aggregation = aggregation;
        self
    }

    /// Handicaps only apply to individual formats.
    pub fn is_handicap_round(&self) -> bool {
        self.use_handicap && self.format != Format::Scramble
    }

    /// Scramble rounds only have team scores.
    pub fn is_team_only(&self) -> bool {
        self.format == Format::Scramble
    }

    pub fn is_active(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}

/// Rounds that count toward the tournament (positive weight).
pub fn active_rounds(rounds: &[Round]) -> Vec<Round> {
    rounds.iter().filter(|r| r.is_active()).cloned().collect()
}

/// Validate the admin page's tournament setup.
///
/// Returns the active rounds and the validated stroke index.
pub fn validate_tournament_setup(
    name: &str,
    rounds: &[Round],
    stroke_index: &[i64],
) -> Result<(Vec<Round>, Vec<u32>)> {
    if name.trim().is_empty() {
        return Err(GolfError::MissingTournamentName);
    }
    let active = active_rounds(rounds);
    if active.is_empty() {
        return Err(GolfError::NoActiveRounds);
    }
    let si = validate_stroke_index(stroke_index)?;
    Ok((active, si))
}
