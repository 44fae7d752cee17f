use log::{debug, warn};

use crate::constants::HOLE_COUNT;
use crate::totals::is_played;

/// Whole handicap strokes for a handicap index.
///
/// Fractions are truncated toward zero; negative and non-finite values give 0.
pub fn handicap_strokes(handicap: f64) -> u32 {
    if !handicap.is_finite() {
        warn!("non-finite handicap {} treated as 0", handicap);
        return 0;
    }
    if handicap <= 0.0 {
        return 0;
    }
    handicap.trunc().min(u32::MAX as f64) as u32
}

/// Allocate handicap strokes across holes by stroke index.
///
/// Every hole receives `H / 18` strokes and the `H % 18` hardest holes
/// (lowest stroke index) receive one more. A hole gets the extra stroke when
/// its stroke index is `<= H % 18`, so a stroke index that is not a
/// permutation of 1..=18 will not hand out exactly `H % 18` extras.
///
/// # Arguments
/// * `handicap` - Handicap index, truncated toward zero
/// * `stroke_index` - Stroke index per hole in hole order
///
/// # Returns
/// Strokes received per hole, same length as `stroke_index`
pub fn strokes_per_hole(handicap: f64, stroke_index: &[u32]) -> Vec<u32> {
    let h = handicap_strokes(handicap);
    let base = h / HOLE_COUNT as u32;
    let rem = h % HOLE_COUNT as u32;

    let strokes: Vec<u32> = stroke_index
        .iter()
        .map(|&si| base + u32::from(si <= rem))
        .collect();

    debug!("allocated {} strokes (base {}, extra {})", h, base, rem);
    strokes
}

/// Net score per hole: `gross - strokes` where gross is played.
///
/// Unplayed holes stay `None`; they are never coerced to zero.
/// Holes past the end of `strokes` receive no strokes.
pub fn net_scores(gross: &[Option<i32>], strokes: &[u32]) -> Vec<Option<i32>> {
    gross
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            if !is_played(g) {
                return None;
            }
            let s = strokes.get(i).copied().unwrap_or(0) as i32;
            g.map(|g| g - s)
        })
        .collect()
}

/// Holes completed: highest played hole index + 1, or 0 when nothing is played.
pub fn thru(gross: &[Option<i32>]) -> usize {
    gross
        .iter()
        .rposition(|&g| is_played(g))
        .map_or(0, |last| last + 1)
}
