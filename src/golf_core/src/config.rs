//! Scoreboard display configuration.
//!
//! One set of flags drives every scoreboard layout, loaded from JSON by the
//! host page or constructed directly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::leaderboard::LeaderboardRow;
use crate::round::Round;

/// Whose leaderboard is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Team,
    #[default]
    Player,
}

/// Leaderboard column layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnLayout {
    /// #, name, ±, thru, strokes
    Compact,
    /// #, name, thru, gross ±, net ±
    GrossNet,
    /// GrossNet for handicap rounds, Compact otherwise
    #[default]
    Auto,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreboardConfig {
    pub view: ViewMode,
    pub layout: ColumnLayout,
}

impl ScoreboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Scramble rounds only have a team leaderboard.
    pub fn effective_view(&self, round: Option<&Round>) -> ViewMode {
        match round {
            Some(r) if r.is_team_only() => ViewMode::Team,
            _ => self.view,
        }
    }

    /// `round` is `None` for the all-rounds view.
    pub fn effective_layout(&self, round: Option<&Round>) -> ColumnLayout {
        match self.layout {
            ColumnLayout::Auto => {
                if round.is_some_and(Round::is_handicap_round) {
                    ColumnLayout::GrossNet
                } else {
                    ColumnLayout::Compact
                }
            }
            fixed => fixed,
        }
    }

    pub fn columns(&self, round: Option<&Round>) -> Vec<&'static str> {
        let name = match self.effective_view(round) {
            ViewMode::Team => "Team",
            ViewMode::Player => "Player",
        };
        match self.effective_layout(round) {
            ColumnLayout::GrossNet => vec!["#", name, "Thru", "Gross ±", "Net ±"],
            _ => vec!["#", name, "±", "Thru", "Strokes"],
        }
    }

    /// Display cells for a row, matching `columns`.
    pub fn cells(&self, row: &LeaderboardRow, round: Option<&Round>) -> Vec<String> {
        let name = row.standing.name.clone();
        match self.effective_layout(round) {
            ColumnLayout::GrossNet => vec![
                row.position_display(),
                name,
                row.thru_display(),
                row.gross_to_par_display(),
                row.net_to_par_display(),
            ],
            _ => vec![
                row.position_display(),
                name,
                row.to_par_display(),
                row.thru_display(),
                row.strokes_display(),
            ],
        }
    }
}
