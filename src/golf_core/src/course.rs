use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{default_stroke_index, DEFAULT_PAR, HOLE_COUNT, MAX_PAR, MIN_PAR};
use crate::error::{GolfError, Result};
use crate::json::de_numbers;
use crate::totals::{coerce_par, segment_par};

/// Check that a stroke index is a permutation of 1..=18.
///
/// Uniqueness is checked before range, so `[0, 1, ..]` with a duplicate
/// reports the duplicate.
pub fn validate_stroke_index(stroke_index: &[i64]) -> Result<Vec<u32>> {
    let values: Vec<f64> = stroke_index.iter().map(|&v| v as f64).collect();
    validate_stroke_index_values(&values)
}

/// Stroke index check over raw JSON numbers. Fractions and NaN are out of range.
pub fn validate_stroke_index_values(stroke_index: &[f64]) -> Result<Vec<u32>> {
    let unique: HashSet<u64> = stroke_index.iter().map(|v| v.to_bits()).collect();
    if stroke_index.len() != HOLE_COUNT || unique.len() != HOLE_COUNT {
        warn!("rejected stroke index {:?}: not 18 unique values", stroke_index);
        return Err(GolfError::StrokeIndexNotUnique);
    }
    if let Some(&bad) = stroke_index
        .iter()
        .find(|&&v| v.fract() != 0.0 || !(1.0..=HOLE_COUNT as f64).contains(&v))
    {
        warn!("rejected stroke index {:?}: {} out of range", stroke_index, bad);
        return Err(GolfError::StrokeIndexOutOfRange { value: bad });
    }
    Ok(stroke_index.iter().map(|&v| v as u32).collect())
}

/// Course layout: par and stroke index per hole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCourse", rename_all = "camelCase")]
pub struct Course {
    pub pars: Vec<u32>,
    pub stroke_index: Vec<u32>,
}

impl Course {
    /// Create a course, validating the stroke index.
    ///
    /// Pars are padded or truncated to 18 holes; missing pars become 4.
    pub fn new(pars: Vec<u32>, stroke_index: &[i64]) -> Result<Self> {
        let stroke_index = validate_stroke_index(stroke_index)?;
        Ok(Self::with_checked_index(pars, stroke_index))
    }

    fn with_checked_index(mut pars: Vec<u32>, stroke_index: Vec<u32>) -> Self {
        pars.resize(HOLE_COUNT, DEFAULT_PAR);
        for (i, &p) in pars.iter().enumerate() {
            if !(MIN_PAR..=MAX_PAR).contains(&p) {
                warn!("hole {} has unusual par {}", i + 1, p);
            }
        }
        Course { pars, stroke_index }
    }

    pub fn par_total(&self) -> u32 {
        self.pars.iter().sum()
    }

    /// Par over the inclusive hole range `start..=end`.
    pub fn segment_par(&self, start: usize, end: usize) -> u32 {
        segment_par(&self.pars, start, end)
    }
}

impl Default for Course {
    /// All par 4 with stroke index in hole order.
    fn default() -> Self {
        Course {
            pars: vec![DEFAULT_PAR; HOLE_COUNT],
            stroke_index: default_stroke_index().to_vec(),
        }
    }
}

/// Course as it appears in JSON; pars may be null, text or fractional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourse {
    #[serde(default, deserialize_with = "de_numbers")]
    pars: Option<Vec<Option<f64>>>,
    #[serde(default, deserialize_with = "de_numbers")]
    stroke_index: Option<Vec<Option<f64>>>,
}

impl TryFrom<RawCourse> for Course {
    type Error = GolfError;

    fn try_from(raw: RawCourse) -> Result<Self> {
        let pars = raw.pars.unwrap_or_default().into_iter().map(coerce_par).collect();
        let stroke_index = match raw.stroke_index {
            Some(si) => {
                let values: Vec<f64> = si.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
                validate_stroke_index_values(&values)?
            }
            None => default_stroke_index().to_vec(),
        };
        Ok(Course::with_checked_index(pars, stroke_index))
    }
}
