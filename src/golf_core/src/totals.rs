use crate::constants::DEFAULT_PAR;

/// Running totals for a set of holes.
///
/// `par_played` only counts the holes that have a value, so an in-progress
/// round still has a meaningful score to par.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoleTotals {
    pub total: i32,
    pub par_played: i32,
    pub holes_played: usize,
}

impl HoleTotals {
    pub fn to_par_diff(&self) -> i32 {
        self.total - self.par_played
    }

    /// "E", "+N" or "-N". Also "E" when nothing is played; check `holes_played`.
    pub fn to_par(&self) -> String {
        format_to_par(self.to_par_diff())
    }

    pub fn has_data(&self) -> bool {
        self.holes_played > 0
    }
}

/// A recorded, strictly positive hole score.
pub fn is_played(v: Option<i32>) -> bool {
    matches!(v, Some(s) if s > 0)
}

/// Convert a raw JSON hole value into a score; null, zero, negative and
/// non-finite values mean "not played".
pub fn coerce_score(v: Option<f64>) -> Option<i32> {
    match v {
        Some(s) if s.is_finite() && s >= 1.0 => Some(s.trunc() as i32),
        _ => None,
    }
}

/// Convert a raw JSON par into a par, defaulting to 4.
pub fn coerce_par(v: Option<f64>) -> u32 {
    match v {
        Some(p) if p.is_finite() && p >= 1.0 => p.trunc() as u32,
        _ => DEFAULT_PAR,
    }
}

/// Drop zero and negative entries so they read as unplayed.
pub fn normalize_gross(gross: &[Option<i32>]) -> Vec<Option<i32>> {
    gross.iter().map(|&g| g.filter(|&s| s > 0)).collect()
}

pub fn has_any_score(values: &[Option<i32>]) -> bool {
    values.iter().any(|&v| is_played(v))
}

fn par_at(pars: &[u32], i: usize) -> i32 {
    pars.get(i).copied().unwrap_or(DEFAULT_PAR) as i32
}

/// Gross totals over every played hole.
///
/// Zero and negative entries are holes not yet played and are skipped.
///
/// # Arguments
/// * `values` - Per-hole gross scores, `None` for holes without one
/// * `pars` - Par per hole; indices past the end count as par 4
pub fn summarize(values: &[Option<i32>], pars: &[u32]) -> HoleTotals {
    summarize_range(values, pars, 0, values.len().max(1) - 1)
}

/// Gross totals over the inclusive hole range `start..=end`.
pub fn summarize_range(values: &[Option<i32>], pars: &[u32], start: usize, end: usize) -> HoleTotals {
    fold_range(values, pars, start, end, |v| is_played(Some(v)))
}

/// Net totals over every hole that has a value.
///
/// A net of zero or below is a real score (a stroke received on a hole in
/// one), so every `Some` counts. Pass net computed from played gross only.
pub fn summarize_net(values: &[Option<i32>], pars: &[u32]) -> HoleTotals {
    summarize_net_range(values, pars, 0, values.len().max(1) - 1)
}

pub fn summarize_net_range(values: &[Option<i32>], pars: &[u32], start: usize, end: usize) -> HoleTotals {
    fold_range(values, pars, start, end, |_| true)
}

fn fold_range(
    values: &[Option<i32>],
    pars: &[u32],
    start: usize,
    end: usize,
    counts: impl Fn(i32) -> bool,
) -> HoleTotals {
    let mut totals = HoleTotals::default();
    for i in start..=end {
        if let Some(&Some(v)) = values.get(i) {
            if counts(v) {
                totals.total += v;
                totals.par_played += par_at(pars, i);
                totals.holes_played += 1;
            }
        }
    }
    totals
}

/// Sum of pars over the inclusive hole range `start..=end`.
pub fn segment_par(pars: &[u32], start: usize, end: usize) -> u32 {
    (start..=end).map(|i| par_at(pars, i) as u32).sum()
}

/// Format a round total against its par.
pub fn to_par(total: i32, par_total: i32) -> String {
    format_to_par(total - par_total)
}

pub fn format_to_par(diff: i32) -> String {
    match diff {
        0 => "E".to_string(),
        d if d > 0 => format!("+{}", d),
        d => d.to_string(),
    }
}

/// Format a fractional difference, as produced by averaged team scores.
///
/// Halves round toward positive infinity, so -2.5 shows as "-2".
pub fn format_to_par_f64(diff: f64) -> String {
    if !diff.is_finite() {
        return "E".to_string();
    }
    format_to_par((diff + 0.5).floor() as i32)
}

/// Read back a to-par display value into a difference.
///
/// Accepts "E", "EVEN" (any case), signed zero and plain numbers.
pub fn parse_to_par(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.eq_ignore_ascii_case("E") || s.eq_ignore_ascii_case("EVEN") {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|d| d.is_finite()).map(|d| d + 0.0)
}
