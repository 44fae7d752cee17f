use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::aggregation::{best_indices, combine, team_round_score};
use crate::config::ViewMode;
use crate::course::Course;
use crate::error::{GolfError, Result};
use crate::json::{de_number, de_numbers};
use crate::leaderboard::{rank, weighted_standing, LeaderboardRow, Standing};
use crate::round::Round;
use crate::scorecard::Scorecard;
use crate::totals::{coerce_score, has_any_score, HoleTotals};

fn de_holes<'de, D>(deserializer: D) -> std::result::Result<Vec<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = de_numbers(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(coerce_score)
        .collect())
}

/// Tournament metadata.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TournamentInfo {
    pub tournament_id: Option<String>,
    pub name: String,
    pub dates: String,
    pub rounds: Vec<Round>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "de_number")]
    pub handicap: Option<f64>,
}

impl Player {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.player_id
        } else {
            &self.name
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
}

/// Posted gross scores for one target in one round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetScores {
    #[serde(default, deserialize_with = "de_holes")]
    pub gross: Vec<Option<i32>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundScores {
    pub player: HashMap<String, TargetScores>,
    pub team: HashMap<String, TargetScores>,
}

impl RoundScores {
    pub fn has_any_score(&self) -> bool {
        self.player
            .values()
            .chain(self.team.values())
            .any(|t| has_any_score(&t.gross))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreData {
    pub rounds: Vec<Option<RoundScores>>,
}

/// Which rounds a leaderboard covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundView {
    All,
    Round(usize),
}

/// Public tournament document: definition, course, roster and posted scores.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TournamentState {
    pub tournament: TournamentInfo,
    pub course: Course,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    #[serde(rename = "score_data")]
    pub score_data: ScoreData,
    pub updated_at: Option<String>,
}

impl TournamentState {
    pub fn new(tournament: TournamentInfo, course: Course, players: Vec<Player>, teams: Vec<Team>) -> Self {
        TournamentState {
            tournament,
            course,
            players,
            teams,
            score_data: ScoreData::default(),
            updated_at: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let state: TournamentState = serde_json::from_str(json)?;
        debug!(
            "loaded tournament {:?}: {} rounds, {} players",
            state.tournament.name,
            state.tournament.rounds.len(),
            state.players.len()
        );
        Ok(state)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.tournament.rounds
    }

    pub fn round(&self, index: usize) -> Result<&Round> {
        self.tournament
            .rounds
            .get(index)
            .ok_or(GolfError::UnknownRound { index })
    }

    /// Record a target's gross scores for a round, growing the score data as needed.
    pub fn set_scores(&mut self, round: usize, view: ViewMode, target_id: &str, gross: Vec<Option<i32>>) -> Result<()> {
        self.round(round)?;
        if self.score_data.rounds.len() <= round {
            self.score_data.rounds.resize(round + 1, None);
        }
        let scores = self.score_data.rounds[round].get_or_insert_with(RoundScores::default);
        let map = match view {
            ViewMode::Player => &mut scores.player,
            ViewMode::Team => &mut scores.team,
        };
        map.insert(target_id.to_string(), TargetScores { gross });
        Ok(())
    }

    fn round_scores(&self, round: usize) -> Option<&RoundScores> {
        self.score_data.rounds.get(round).and_then(Option::as_ref)
    }

    fn posted(&self, round: usize, view: ViewMode, target_id: &str) -> &[Option<i32>] {
        self.round_scores(round)
            .and_then(|s| match view {
                ViewMode::Player => s.player.get(target_id),
                ViewMode::Team => s.team.get(target_id),
            })
            .map_or(&[][..], |t| t.gross.as_slice())
    }

    /// Teams from the document, or derived from the roster when absent.
    pub fn team_list(&self) -> Vec<Team> {
        if !self.teams.is_empty() {
            return self.teams.clone();
        }
        let mut teams: Vec<Team> = Vec::new();
        for p in &self.players {
            if let Some(id) = &p.team_id {
                if !teams.iter().any(|t| &t.team_id == id) {
                    teams.push(Team {
                        team_id: id.clone(),
                        team_name: p.team_name.clone().unwrap_or_else(|| id.clone()),
                    });
                }
            }
        }
        teams
    }

    pub fn team_name(&self, team_id: &str) -> String {
        self.team_list()
            .into_iter()
            .find(|t| t.team_id == team_id)
            .map(|t| t.team_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| team_id.to_string())
    }

    pub fn team_members(&self, team_id: &str) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.team_id.as_deref() == Some(team_id))
            .collect()
    }

    /// Default entry group for a player: their whole team, or just them.
    pub fn default_group(&self, player_id: &str) -> Vec<String> {
        let team = self
            .players
            .iter()
            .find(|p| p.player_id == player_id)
            .and_then(|p| p.team_id.as_deref());
        let group: Vec<String> = match team {
            Some(team_id) => self
                .team_members(team_id)
                .iter()
                .map(|p| p.player_id.clone())
                .collect(),
            None => Vec::new(),
        };
        if group.is_empty() {
            vec![player_id.to_string()]
        } else {
            group
        }
    }

    /// Index of the latest round with any posted score.
    ///
    /// Falls back to the first round when nothing is posted; `None` without rounds.
    pub fn newest_round_with_data(&self) -> Option<usize> {
        let count = self.tournament.rounds.len();
        if count == 0 {
            return None;
        }
        let newest = (0..count)
            .rev()
            .find(|&i| self.round_scores(i).is_some_and(RoundScores::has_any_score));
        Some(newest.unwrap_or(0))
    }

    /// Scorecard for a player or team in a round.
    pub fn scorecard(&self, round: usize, view: ViewMode, target_id: &str) -> Result<Scorecard> {
        let r = self.round(round)?;
        match view {
            ViewMode::Player => {
                let player = self
                    .players
                    .iter()
                    .find(|p| p.player_id == target_id)
                    .ok_or_else(|| GolfError::UnknownTarget {
                        kind: "player",
                        id: target_id.to_string(),
                    })?;
                Ok(self.player_scorecard(round, r, player))
            }
            ViewMode::Team => {
                if !self.team_list().iter().any(|t| t.team_id == target_id) {
                    return Err(GolfError::UnknownTarget {
                        kind: "team",
                        id: target_id.to_string(),
                    });
                }
                Ok(Scorecard::build(&self.course, self.posted(round, ViewMode::Team, target_id), 0.0, false))
            }
        }
    }

    fn player_scorecard(&self, round: usize, r: &Round, player: &Player) -> Scorecard {
        let handicap = player.handicap.unwrap_or(0.0);
        Scorecard::build(
            &self.course,
            self.posted(round, ViewMode::Player, &player.player_id),
            handicap,
            r.is_handicap_round(),
        )
    }

    fn player_standing(&self, round: usize, r: &Round, player: &Player) -> Standing {
        let team_name = player
            .team_id
            .as_deref()
            .map(|id| player.team_name.clone().unwrap_or_else(|| self.team_name(id)));
        let base = Standing::empty(&player.player_id, player.display_name(), team_name);
        if r.is_team_only() {
            return base;
        }

        let card = self.player_scorecard(round, r, player);
        if !card.has_data() {
            return base;
        }
        let counting = card.counting_totals();
        Standing {
            thru: Some(card.thru),
            strokes: counting.total as f64,
            to_par: counting.to_par_diff() as f64,
            gross_to_par: Some(card.gross_totals.to_par_diff() as f64),
            net_to_par: card
                .use_handicap
                .then(|| card.net_totals.to_par_diff() as f64),
            has_data: true,
            ..base
        }
    }

    fn team_standing(&self, round: usize, r: &Round, team: &Team) -> Standing {
        let base = Standing::empty(&team.team_id, team_display_name(team), None);

        // Scramble rounds score the team target; other formats aggregate members.
        let team_card = r
            .is_team_only()
            .then(|| Scorecard::build(&self.course, self.posted(round, ViewMode::Team, &team.team_id), 0.0, false))
            .filter(Scorecard::has_data);
        let cards: Vec<Scorecard> = if r.is_team_only() {
            Vec::new()
        } else {
            self.team_members(&team.team_id)
                .into_iter()
                .map(|p| self.player_scorecard(round, r, p))
                .filter(Scorecard::has_data)
                .collect()
        };

        let Some(gross) = team_side(r, team_card.as_ref(), &cards, |c| c.gross_totals) else {
            return base;
        };
        let net = if r.is_handicap_round() {
            team_side(r, None, &cards, |c| c.net_totals)
        } else {
            None
        };
        let (strokes, par) = net.unwrap_or(gross);
        let thru = match &team_card {
            Some(card) => Some(card.thru),
            None => cards.iter().map(|c| c.thru).min(),
        };

        Standing {
            thru,
            strokes,
            to_par: strokes - par,
            gross_to_par: Some(gross.0 - gross.1),
            net_to_par: net.map(|(total, par)| total - par),
            has_data: true,
            ..base
        }
    }

    fn round_standings(&self, round: usize, view: ViewMode) -> Result<Vec<Standing>> {
        let r = self.round(round)?;
        let standings = match view {
            ViewMode::Player => self
                .players
                .par_iter()
                .map(|p| self.player_standing(round, r, p))
                .collect(),
            ViewMode::Team => self
                .team_list()
                .par_iter()
                .map(|t| self.team_standing(round, r, t))
                .collect(),
        };
        Ok(standings)
    }

    /// Leaderboard for one round or for all active rounds, weighted.
    pub fn leaderboard(&self, view: ViewMode, rounds: RoundView) -> Result<Vec<LeaderboardRow>> {
        let standings = match rounds {
            RoundView::Round(index) => self.round_standings(index, view)?,
            RoundView::All => self.weighted_standings(view)?,
        };
        debug!("leaderboard {:?} {:?}: {} rows", view, rounds, standings.len());
        Ok(rank(standings))
    }

    fn weighted_standings(&self, view: ViewMode) -> Result<Vec<Standing>> {
        let mut per_round: Vec<(f64, Vec<Standing>)> = Vec::new();
        for (i, r) in self.tournament.rounds.iter().enumerate() {
            if !r.is_active() {
                warn!("round {} ({}) has weight {} and is ignored", i + 1, r.name, r.weight);
                continue;
            }
            per_round.push((r.weight, self.round_standings(i, view)?));
        }

        let bases: Vec<Standing> = match view {
            ViewMode::Player => self
                .players
                .iter()
                .map(|p| {
                    let team_name = p
                        .team_id
                        .as_deref()
                        .map(|id| p.team_name.clone().unwrap_or_else(|| self.team_name(id)));
                    Standing::empty(&p.player_id, p.display_name(), team_name)
                })
                .collect(),
            ViewMode::Team => self
                .team_list()
                .iter()
                .map(|t| Standing::empty(&t.team_id, team_display_name(t), None))
                .collect(),
        };

        // Round standings are built in roster order, so index i matches base i.
        Ok(bases
            .into_iter()
            .enumerate()
            .map(|(i, base)| {
                let rounds: Vec<(f64, Standing)> = per_round
                    .iter()
                    .map(|(w, standings)| (*w, standings[i].clone()))
                    .collect();
                weighted_standing(base, &rounds)
            })
            .collect())
    }
}

fn team_display_name(team: &Team) -> &str {
    if team.team_name.is_empty() {
        &team.team_id
    } else {
        &team.team_name
    }
}

/// Team score for one side (gross or net) and the par it is measured against.
///
/// The par is combined with the same mode over the same counted players as
/// the score, so an averaged team is compared to an averaged par.
fn team_side(
    r: &Round,
    team_card: Option<&Scorecard>,
    cards: &[Scorecard],
    side: impl Fn(&Scorecard) -> HoleTotals,
) -> Option<(f64, f64)> {
    let agg = &r.team_aggregation;
    let totals: Vec<HoleTotals> = cards.iter().map(&side).collect();
    let scores: Vec<i32> = totals.iter().map(|t| t.total).collect();
    let team = team_card.map(&side);

    let strokes = team_round_score(r.format, agg, team.map(|t| t.total), &scores)?;
    let par = match team {
        Some(t) if r.is_team_only() => t.par_played as f64,
        _ => combine(
            best_indices(&scores, agg.top_x).iter().map(|&i| totals[i].par_played),
            agg,
        ),
    };
    Some((strokes, par))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{AggregationMode, Format, TeamAggregation};

    fn holes(scores: &[i32]) -> Vec<Option<i32>> {
        let mut out: Vec<Option<i32>> = scores.iter().map(|&s| Some(s)).collect();
        out.resize(18, None);
        out
    }

    fn player(id: &str, team: &str, handicap: f64) -> Player {
        Player {
            player_id: id.to_string(),
            name: id.to_uppercase(),
            team_id: Some(team.to_string()),
            team_name: None,
            handicap: Some(handicap),
        }
    }

    fn make_tournament() -> TournamentState {
        let info = TournamentInfo {
            tournament_id: Some("t1".to_string()),
            name: "Cup".to_string(),
            dates: String::new(),
            rounds: vec![
                Round::new("Scramble", Format::Scramble, false, 0.5),
                Round::new("Singles", Format::Singles, true, 0.5)
                    .with_aggregation(TeamAggregation::new(AggregationMode::Sum, 1)),
            ],
        };
        let players = vec![
            player("a", "red", 18.0),
            player("b", "red", 0.0),
            player("c", "blue", 2.0),
        ];
        let teams = vec![
            Team { team_id: "red".to_string(), team_name: "Red".to_string() },
            Team { team_id: "blue".to_string(), team_name: "Blue".to_string() },
        ];
        TournamentState::new(info, Course::default(), players, teams)
    }

    #[test]
    fn test_player_round_leaderboard() {
        let mut t = make_tournament();
        t.set_scores(1, ViewMode::Player, "a", holes(&[5, 5, 5])).unwrap();
        t.set_scores(1, ViewMode::Player, "c", holes(&[4, 4])).unwrap();

        let rows = t.leaderboard(ViewMode::Player, RoundView::Round(1)).unwrap();

        // a: gross 15 on par 12 (+3), one stroke per hole -> net 12 (E)
        // c: gross 8 on par 8, strokes on holes 1 and 2 -> net 6 (-2)
        assert_eq!(rows[0].standing.id, "c");
        assert_eq!(rows[0].to_par_display(), "-2");
        assert_eq!(rows[1].standing.id, "a");
        assert_eq!(rows[1].gross_to_par_display(), "+3");
        assert_eq!(rows[1].net_to_par_display(), "E");
        assert_eq!(rows[1].standing.team_name.as_deref(), Some("Red"));
        assert_eq!(rows[2].standing.id, "b");
        assert_eq!(rows[2].position, None);
    }

    #[test]
    fn test_scramble_team_leaderboard_uses_team_target() {
        let mut t = make_tournament();
        t.set_scores(0, ViewMode::Team, "red", holes(&[3, 4, 4])).unwrap();
        // Player entries are ignored in a scramble
        t.set_scores(0, ViewMode::Player, "c", holes(&[2, 2, 2])).unwrap();

        let rows = t.leaderboard(ViewMode::Team, RoundView::Round(0)).unwrap();
        assert_eq!(rows[0].standing.id, "red");
        assert_eq!(rows[0].to_par_display(), "-1");
        assert_eq!(rows[0].thru_display(), "3");
        assert!(!rows[1].standing.has_data);

        let players = t.leaderboard(ViewMode::Player, RoundView::Round(0)).unwrap();
        assert!(players.iter().all(|r| !r.standing.has_data));
    }

    #[test]
    fn test_team_aggregation_counts_best_player() {
        let mut t = make_tournament();
        t.set_scores(1, ViewMode::Player, "a", holes(&[6, 6])).unwrap();
        t.set_scores(1, ViewMode::Player, "b", holes(&[4, 5])).unwrap();

        let rows = t.leaderboard(ViewMode::Team, RoundView::Round(1)).unwrap();
        let red = &rows[0];

        // top 1 on net: a nets 10 (+2), b nets 9 (+1)
        assert_eq!(red.standing.id, "red");
        assert_eq!(red.standing.strokes, 9.0);
        assert_eq!(red.to_par_display(), "+1");
        assert_eq!(red.gross_to_par_display(), "+1");
    }

    #[test]
    fn test_averaged_shamble_team() {
        let info = TournamentInfo {
            name: "Cup".to_string(),
            rounds: vec![Round::new("Shamble", Format::Shamble, true, 1.0)
                .with_aggregation(TeamAggregation::new(AggregationMode::Avg, 2))],
            ..TournamentInfo::default()
        };
        let players = vec![
            player("a", "red", 0.0),
            player("b", "red", 36.0),
            player("c", "red", 0.0),
        ];
        let mut t = TournamentState::new(info, Course::default(), players, vec![]);
        // a: gross 8 net 8 on par 8; b: gross 10 net 6 on par 8; c: gross 5 net 5 on par 4
        t.set_scores(0, ViewMode::Player, "a", holes(&[4, 4])).unwrap();
        t.set_scores(0, ViewMode::Player, "b", holes(&[5, 5])).unwrap();
        t.set_scores(0, ViewMode::Player, "c", holes(&[5])).unwrap();

        let rows = t.leaderboard(ViewMode::Team, RoundView::Round(0)).unwrap();
        let red = &rows[0].standing;

        // net counts c and b: (5 + 6) / 2 against (4 + 8) / 2
        assert_eq!(red.strokes, 5.5);
        assert_eq!(red.to_par, -0.5);
        assert_eq!(red.net_to_par, Some(-0.5));
        // gross counts c and a: (5 + 8) / 2 against (4 + 8) / 2
        assert_eq!(red.gross_to_par, Some(0.5));
        assert_eq!(red.thru, Some(1));

        assert_eq!(rows[0].to_par_display(), "E");
        assert_eq!(rows[0].net_to_par_display(), "E");
        assert_eq!(rows[0].gross_to_par_display(), "+1");
    }

    #[test]
    fn test_all_rounds_weighted() {
        let mut t = make_tournament();
        t.set_scores(0, ViewMode::Team, "red", holes(&[3, 3])).unwrap();
        t.set_scores(1, ViewMode::Player, "b", holes(&[6, 6])).unwrap();

        let rows = t.leaderboard(ViewMode::Team, RoundView::All).unwrap();
        let red = rows.iter().find(|r| r.standing.id == "red").unwrap();

        // 0.5 * (-2) + 0.5 * (+4)
        assert_eq!(red.standing.to_par, 1.0);
        assert_eq!(red.thru_display(), "—");
    }

    #[test]
    fn test_newest_round_with_data() {
        let mut t = make_tournament();
        assert_eq!(t.newest_round_with_data(), Some(0));

        t.set_scores(1, ViewMode::Player, "a", holes(&[4])).unwrap();
        assert_eq!(t.newest_round_with_data(), Some(1));

        assert_eq!(TournamentState::default().newest_round_with_data(), None);
    }

    #[test]
    fn test_unknown_round_and_target() {
        let mut t = make_tournament();
        assert!(matches!(
            t.set_scores(5, ViewMode::Player, "a", vec![]),
            Err(GolfError::UnknownRound { index: 5 })
        ));
        assert!(matches!(
            t.scorecard(0, ViewMode::Player, "zed"),
            Err(GolfError::UnknownTarget { kind: "player", .. })
        ));
        assert!(t.scorecard(0, ViewMode::Team, "red").is_ok());
    }

    #[test]
    fn test_default_group() {
        let t = make_tournament();
        assert_eq!(t.default_group("a"), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(t.default_group("ghost"), vec!["ghost".to_string()]);
    }

    #[test]
    fn test_from_json_document() {
        let json = r#"{
            "tournament": {"name": "Cup", "rounds": [
                {"name": "Day 1", "format": "shamble", "useHandicap": true, "weight": 1,
                 "teamAggregation": {"mode": "sum", "topX": 2}}
            ]},
            "course": {"pars": [4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4],
                       "strokeIndex": [1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18]},
            "players": [
                {"playerId": "p1", "name": "Ann", "teamId": "t1", "teamName": "Aces", "handicap": 9.6},
                {"playerId": "p2", "name": "Bo", "teamId": "t1"}
            ],
            "score_data": {"rounds": [
                {"player": {"p1": {"gross": [5, 4, 0, null, 4.0]}}}
            ]},
            "updatedAt": "2024-05-01T10:00:00Z"
        }"#;
        let t = TournamentState::from_json_str(json).unwrap();

        assert_eq!(t.team_list(), vec![Team { team_id: "t1".to_string(), team_name: "Aces".to_string() }]);
        let card = t.scorecard(0, ViewMode::Player, "p1").unwrap();
        assert_eq!(card.gross[2], None);
        assert_eq!(card.thru, 5);
        assert_eq!(card.strokes_received(), 9);
        assert_eq!(t.newest_round_with_data(), Some(0));
    }

    #[test]
    fn test_numbers_given_as_text_are_coerced() {
        let json = r#"{
            "tournament": {"name": "Cup", "rounds": [{"format": "singles", "useHandicap": true, "weight": "1"}]},
            "players": [
                {"playerId": "p1", "handicap": "12"},
                {"playerId": "p2", "handicap": "scratch"}
            ],
            "score_data": {"rounds": [
                {"player": {"p1": {"gross": ["5", "", "x", 4]}}}
            ]}
        }"#;
        let t = TournamentState::from_json_str(json).unwrap();

        assert_eq!(t.players[0].handicap, Some(12.0));
        assert_eq!(t.players[1].handicap, None);
        assert!(t.rounds()[0].is_active());

        let card = t.scorecard(0, ViewMode::Player, "p1").unwrap();
        assert_eq!(&card.gross[..4], &[Some(5), None, None, Some(4)]);
        assert_eq!(card.strokes_received(), 12);
    }

    #[test]
    fn test_bad_stroke_index_in_document_rejected() {
        let json = r#"{"course": {"pars": [], "strokeIndex": [1, 2, 3]}}"#;
        assert!(matches!(TournamentState::from_json_str(json), Err(GolfError::Json(_))));
    }
}
