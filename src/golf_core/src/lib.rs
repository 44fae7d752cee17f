//! Golf Core - scoring library for team golf tournaments.
//!
//! Handicap stroke allocation, net and to-par arithmetic, team aggregation and
//! leaderboards, with optional Python bindings via PyO3 (`python` feature).

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod course;
pub mod dots;
pub mod entry;
pub mod error;
pub mod handicap;
mod json;
pub mod leaderboard;
pub mod round;
pub mod scorecard;
pub mod totals;
pub mod tournament;

#[cfg(feature = "python")]
mod python;

pub use aggregation::{aggregate_team_score, team_round_score};
pub use config::{ColumnLayout, ScoreboardConfig, ViewMode};
pub use constants::{HOLE_COUNT, MAX_HOLE_SCORE, MAX_TOP_X};
pub use course::{validate_stroke_index, validate_stroke_index_values, Course};
pub use dots::dots_for_strokes;
pub use entry::{next_hole_for_group, parse_score_input};
pub use error::{GolfError, Result};
pub use handicap::{net_scores, strokes_per_hole};
pub use leaderboard::{rank, LeaderboardRow, Standing};
pub use round::{AggregationMode, Format, Round, TeamAggregation};
pub use scorecard::Scorecard;
pub use totals::{format_to_par, summarize, summarize_net, to_par, HoleTotals};
pub use tournament::{Player, RoundView, Team, TournamentState};
