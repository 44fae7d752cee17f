use crate::round::{AggregationMode, Format, TeamAggregation};

/// Indices of the best (lowest) `top_x` scores, lowest first.
///
/// Equal scores keep their input order.
pub fn best_indices(scores: &[i32], top_x: u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by_key(|&i| scores[i]);
    order.truncate(top_x as usize);
    order
}

/// Combine values picked by `best_indices` according to the aggregation mode.
///
/// `avg` divides by the configured top-X even when fewer values were counted.
pub fn combine(values: impl Iterator<Item = i32>, aggregation: &TeamAggregation) -> f64 {
    let sum: i32 = values.sum();
    match aggregation.mode {
        AggregationMode::Sum => sum as f64,
        AggregationMode::Avg => sum as f64 / aggregation.top_x as f64,
    }
}

/// Team score from its players' round scores.
///
/// Sorts ascending and counts the best `top_x`; returns `None` when no
/// player has a score.
///
/// # Arguments
/// * `scores` - Player net scores (gross when the round has no handicap)
/// * `aggregation` - Sum or average of the counted scores
pub fn aggregate_team_score(scores: &[i32], aggregation: &TeamAggregation) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let best = best_indices(scores, aggregation.top_x);
    Some(combine(best.iter().map(|&i| scores[i]), aggregation))
}

/// Team score for a round of any format.
///
/// Scramble rounds take the single score posted for the team target and
/// skip aggregation entirely.
pub fn team_round_score(
    format: Format,
    aggregation: &TeamAggregation,
    team_score: Option<i32>,
    player_scores: &[i32],
) -> Option<f64> {
    match format {
        Format::Scramble => team_score.map(f64::from),
        Format::Shamble | Format::Singles => aggregate_team_score(player_scores, aggregation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_two_of_three_summed() {
        let agg = TeamAggregation::new(AggregationMode::Sum, 2);
        assert_eq!(aggregate_team_score(&[70, 68, 75], &agg), Some(138.0));
    }

    #[test]
    fn test_average_divides_by_top_x() {
        let agg = TeamAggregation::new(AggregationMode::Avg, 2);
        assert_eq!(aggregate_team_score(&[70, 68, 75], &agg), Some(69.0));
    }

    #[test]
    fn test_fewer_scores_than_top_x() {
        let sum = TeamAggregation::new(AggregationMode::Sum, 4);
        let avg = TeamAggregation::new(AggregationMode::Avg, 4);

        assert_eq!(aggregate_team_score(&[72, 80], &sum), Some(152.0));
        assert_eq!(aggregate_team_score(&[72, 80], &avg), Some(38.0));
        assert_eq!(aggregate_team_score(&[], &sum), None);
    }

    #[test]
    fn test_best_indices_stable_on_ties() {
        assert_eq!(best_indices(&[71, 70, 70, 69], 3), vec![3, 1, 2]);
    }

    #[test]
    fn test_scramble_bypasses_aggregation() {
        let agg = TeamAggregation::new(AggregationMode::Sum, 1);

        assert_eq!(team_round_score(Format::Scramble, &agg, Some(64), &[70, 71]), Some(64.0));
        assert_eq!(team_round_score(Format::Scramble, &agg, None, &[70, 71]), None);
        assert_eq!(team_round_score(Format::Shamble, &agg, Some(64), &[70, 71]), Some(70.0));
    }
}
