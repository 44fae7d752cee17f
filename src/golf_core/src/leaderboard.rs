use std::cmp::Ordering;

use crate::totals::format_to_par_f64;

/// One target's result before ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub id: String,
    pub name: String,
    pub team_name: Option<String>,
    pub thru: Option<usize>,
    /// Counting strokes: net in handicap rounds, gross otherwise
    pub strokes: f64,
    pub to_par: f64,
    pub gross_to_par: Option<f64>,
    pub net_to_par: Option<f64>,
    pub has_data: bool,
}

impl Standing {
    /// A target with nothing posted.
    pub fn empty(id: &str, name: &str, team_name: Option<String>) -> Self {
        Standing {
            id: id.to_string(),
            name: name.to_string(),
            team_name,
            thru: None,
            strokes: 0.0,
            to_par: 0.0,
            gross_to_par: None,
            net_to_par: None,
            has_data: false,
        }
    }
}

/// A ranked leaderboard row.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRow {
    /// Shared by tied rows; `None` until the target posts a score
    pub position: Option<usize>,
    pub standing: Standing,
}

impl LeaderboardRow {
    pub fn position_display(&self) -> String {
        self.position.map_or_else(|| "—".to_string(), |p| p.to_string())
    }

    pub fn to_par_display(&self) -> String {
        if self.standing.has_data {
            format_to_par_f64(self.standing.to_par)
        } else {
            "E".to_string()
        }
    }

    pub fn gross_to_par_display(&self) -> String {
        display_optional(self.standing.gross_to_par)
    }

    pub fn net_to_par_display(&self) -> String {
        display_optional(self.standing.net_to_par)
    }

    pub fn thru_display(&self) -> String {
        self.standing
            .thru
            .map_or_else(|| "—".to_string(), |t| t.to_string())
    }

    pub fn strokes_display(&self) -> String {
        if !self.standing.has_data {
            return "—".to_string();
        }
        let s = self.standing.strokes;
        if s.fract() == 0.0 {
            format!("{}", s as i64)
        } else {
            format!("{:.1}", s)
        }
    }
}

fn display_optional(v: Option<f64>) -> String {
    v.map_or_else(|| "—".to_string(), format_to_par_f64)
}

fn compare(a: &Standing, b: &Standing) -> Ordering {
    b.has_data
        .cmp(&a.has_data)
        .then_with(|| {
            if a.has_data {
                a.to_par
                    .total_cmp(&b.to_par)
                    .then_with(|| a.strokes.total_cmp(&b.strokes))
            } else {
                Ordering::Equal
            }
        })
}

/// Sort standings and assign positions.
///
/// Targets with posted scores come first, ordered by score to par and then
/// strokes. Ties share the lowest position and keep their input order.
pub fn rank(mut standings: Vec<Standing>) -> Vec<LeaderboardRow> {
    standings.sort_by(compare);

    let mut rows: Vec<LeaderboardRow> = Vec::with_capacity(standings.len());
    for (i, standing) in standings.into_iter().enumerate() {
        let position = if !standing.has_data {
            None
        } else {
            match rows.last() {
                Some(prev) if compare(&prev.standing, &standing) == Ordering::Equal => prev.position,
                _ => Some(i + 1),
            }
        };
        rows.push(LeaderboardRow { position, standing });
    }
    rows
}

/// Combine per-round standings for one target into a weighted all-rounds standing.
///
/// Only rounds in which the target posted scores contribute. Gross and net
/// to par are not carried over because they are round-specific.
pub fn weighted_standing(base: Standing, rounds: &[(f64, Standing)]) -> Standing {
    let mut combined = base;
    combined.thru = None;
    combined.gross_to_par = None;
    combined.net_to_par = None;

    for (weight, standing) in rounds.iter().filter(|(_, s)| s.has_data) {
        combined.strokes += weight * standing.strokes;
        combined.to_par += weight * standing.to_par;
        combined.has_data = true;
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(id: &str, to_par: f64, strokes: f64) -> Standing {
        Standing {
            thru: Some(18),
            strokes,
            to_par,
            has_data: true,
            ..Standing::empty(id, id, None)
        }
    }

    #[test]
    fn test_rank_orders_by_to_par_then_strokes() {
        let rows = rank(vec![
            standing("A", 3.0, 75.0),
            Standing::empty("B", "B", None),
            standing("C", -2.0, 70.0),
            standing("D", 3.0, 74.0),
        ]);

        let ids: Vec<&str> = rows.iter().map(|r| r.standing.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "D", "A", "B"]);
        assert_eq!(rows[0].position, Some(1));
        assert_eq!(rows[3].position, None);
        assert_eq!(rows[3].position_display(), "—");
    }

    #[test]
    fn test_ties_share_position() {
        let rows = rank(vec![
            standing("A", 1.0, 73.0),
            standing("B", -1.0, 71.0),
            standing("C", 1.0, 73.0),
            standing("D", 2.0, 74.0),
        ]);

        let positions: Vec<Option<usize>> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![Some(1), Some(2), Some(2), Some(4)]);
        assert_eq!(rows[1].standing.id, "A");
        assert_eq!(rows[2].standing.id, "C");
    }

    #[test]
    fn test_row_displays() {
        let rows = rank(vec![standing("A", -3.0, 69.0), Standing::empty("B", "B", None)]);

        assert_eq!(rows[0].to_par_display(), "-3");
        assert_eq!(rows[0].strokes_display(), "69");
        assert_eq!(rows[0].thru_display(), "18");
        assert_eq!(rows[0].gross_to_par_display(), "—");
        assert_eq!(rows[1].to_par_display(), "E");
        assert_eq!(rows[1].strokes_display(), "—");
    }

    #[test]
    fn test_fractional_strokes_display() {
        let rows = rank(vec![standing("A", 0.5, 72.5)]);
        assert_eq!(rows[0].strokes_display(), "72.5");
        assert_eq!(rows[0].to_par_display(), "+1");
    }

    #[test]
    fn test_weighted_standing_skips_unplayed_rounds() {
        let base = Standing::empty("A", "A", None);
        let rounds = vec![
            (0.5, standing("A", 4.0, 76.0)),
            (1.0, Standing::empty("A", "A", None)),
            (0.25, standing("A", -4.0, 68.0)),
        ];
        let combined = weighted_standing(base, &rounds);

        assert!(combined.has_data);
        assert_eq!(combined.to_par, 1.0);
        assert_eq!(combined.strokes, 38.0 + 17.0);
        assert_eq!(combined.thru, None);
    }

    #[test]
    fn test_weighted_standing_without_rounds() {
        let combined = weighted_standing(Standing::empty("A", "A", None), &[]);
        assert!(!combined.has_data);
    }
}
