use log::warn;
use std::collections::HashMap;

use crate::constants::{HOLE_COUNT, MAX_HOLE_SCORE};
use crate::error::{GolfError, Result};
use crate::totals::is_played;

/// Parse a typed hole score.
///
/// Blank and "0" mean "not played"; otherwise a whole number 1..=20.
pub fn parse_score_input(input: &str) -> Result<Option<i32>> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let invalid = || GolfError::InvalidScore {
        input: input.to_string(),
        max: MAX_HOLE_SCORE,
    };
    let value: i64 = s.parse().map_err(|_| {
        warn!("rejected score input {:?}", input);
        invalid()
    })?;
    match value {
        0 => Ok(None),
        v if (1..=MAX_HOLE_SCORE as i64).contains(&v) => Ok(Some(v as i32)),
        _ => Err(invalid()),
    }
}

/// Parse a full row of typed scores, one entry per hole.
pub fn parse_score_row(inputs: &[&str]) -> Result<Vec<Option<i32>>> {
    inputs.iter().map(|s| parse_score_input(s)).collect()
}

/// The lowest hole where some target in the group has no score yet.
///
/// Targets without any saved scores count as missing every hole.
/// Returns the last hole when everyone has finished.
pub fn next_hole_for_group(saved: &HashMap<String, Vec<Option<i32>>>, targets: &[String]) -> usize {
    (0..HOLE_COUNT)
        .find(|&i| {
            targets.iter().any(|id| {
                let value = saved.get(id).and_then(|holes| holes.get(i).copied()).flatten();
                !is_played(value)
            })
        })
        .unwrap_or(HOLE_COUNT - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_input() {
        assert_eq!(parse_score_input("").unwrap(), None);
        assert_eq!(parse_score_input("  ").unwrap(), None);
        assert_eq!(parse_score_input("0").unwrap(), None);
        assert_eq!(parse_score_input(" 5 ").unwrap(), Some(5));
        assert_eq!(parse_score_input("20").unwrap(), Some(20));
        assert!(parse_score_input("21").is_err());
        assert!(parse_score_input("-2").is_err());
        assert!(parse_score_input("4.5").is_err());
        assert!(parse_score_input("four").is_err());
    }

    #[test]
    fn test_parse_score_row() {
        assert_eq!(parse_score_row(&["4", "", "0", "6"]).unwrap(), vec![Some(4), None, None, Some(6)]);
        assert!(parse_score_row(&["4", "x"]).is_err());
    }

    #[test]
    fn test_next_hole_for_group() {
        let mut saved = HashMap::new();
        let mut a = vec![None; 18];
        let mut b = vec![None; 18];
        for i in 0..5 {
            a[i] = Some(4);
        }
        for i in 0..3 {
            b[i] = Some(5);
        }
        saved.insert("a".to_string(), a);
        saved.insert("b".to_string(), b);

        assert_eq!(next_hole_for_group(&saved, &["a".to_string()]), 5);
        assert_eq!(next_hole_for_group(&saved, &["a".to_string(), "b".to_string()]), 3);
        assert_eq!(next_hole_for_group(&saved, &["nobody".to_string()]), 0);
    }

    #[test]
    fn test_finished_group_stays_on_last_hole() {
        let mut saved = HashMap::new();
        saved.insert("a".to_string(), vec![Some(4); 18]);
        assert_eq!(next_hole_for_group(&saved, &["a".to_string()]), 17);
        assert_eq!(next_hole_for_group(&saved, &[]), 17);
    }
}
