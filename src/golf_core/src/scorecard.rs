use log::debug;

use crate::constants::{BACK_NINE, FRONT_NINE, HOLE_COUNT};
use crate::course::Course;
use crate::dots::dots_row;
use crate::handicap::{net_scores, strokes_per_hole, thru};
use crate::totals::{
    format_to_par, normalize_gross, summarize, summarize_net, summarize_net_range, summarize_range, HoleTotals,
};

/// Totals for one nine.
#[derive(Clone, Debug, PartialEq)]
pub struct NineSummary {
    pub label: &'static str,
    pub par: u32,
    pub gross: HoleTotals,
    /// Only present when handicaps are used
    pub net: Option<HoleTotals>,
}

/// Hole-by-hole scorecard for one player or team in one round.
#[derive(Clone, Debug, PartialEq)]
pub struct Scorecard {
    pub pars: Vec<u32>,
    pub stroke_index: Vec<u32>,
    pub gross: Vec<Option<i32>>,
    /// Equal to `gross` when handicaps are not used
    pub net: Vec<Option<i32>>,
    pub strokes: Vec<u32>,
    pub dots: Vec<&'static str>,
    pub use_handicap: bool,
    pub gross_totals: HoleTotals,
    pub net_totals: HoleTotals,
    pub thru: usize,
    pub front: NineSummary,
    pub back: NineSummary,
}

impl Scorecard {
    /// Build a scorecard from posted gross scores.
    ///
    /// Gross is padded to 18 holes; zero and negative entries count as unplayed.
    /// Handicap strokes are only allocated when `use_handicap` is set.
    pub fn build(course: &Course, gross: &[Option<i32>], handicap: f64, use_handicap: bool) -> Self {
        let mut gross = normalize_gross(gross);
        gross.resize(HOLE_COUNT, None);

        let strokes = if use_handicap {
            strokes_per_hole(handicap, &course.stroke_index)
        } else {
            vec![0; HOLE_COUNT]
        };
        let net = if use_handicap {
            net_scores(&gross, &strokes)
        } else {
            gross.clone()
        };

        let gross_totals = summarize(&gross, &course.pars);
        let net_totals = summarize_net(&net, &course.pars);

        let nine = |label, (start, end): (usize, usize)| NineSummary {
            label,
            par: course.segment_par(start, end),
            gross: summarize_range(&gross, &course.pars, start, end),
            net: use_handicap.then(|| summarize_net_range(&net, &course.pars, start, end)),
        };
        let front = nine("Front 9", FRONT_NINE);
        let back = nine("Back 9", BACK_NINE);

        let card = Scorecard {
            pars: course.pars.clone(),
            stroke_index: course.stroke_index.clone(),
            thru: thru(&gross),
            dots: dots_row(&strokes),
            gross,
            net,
            strokes,
            use_handicap,
            gross_totals,
            net_totals,
            front,
            back,
        };
        debug!("scorecard built: {}", card.summary_line());
        card
    }

    pub fn has_data(&self) -> bool {
        self.gross_totals.has_data()
    }

    pub fn strokes_received(&self) -> u32 {
        self.strokes.iter().sum()
    }

    /// Totals that rank the card: net for handicap rounds, gross otherwise.
    pub fn counting_totals(&self) -> HoleTotals {
        if self.use_handicap {
            self.net_totals
        } else {
            self.gross_totals
        }
    }

    /// One line summary, e.g. "Gross 80 (+8) • Net 72 (E) • Thru 18".
    pub fn summary_line(&self) -> String {
        let gross = format!(
            "Gross {} ({})",
            self.gross_totals.total,
            format_to_par(self.gross_totals.to_par_diff())
        );
        if self.use_handicap {
            format!(
                "{} • Net {} ({}) • Thru {}",
                gross,
                self.net_totals.total,
                format_to_par(self.net_totals.to_par_diff()),
                self.thru
            )
        } else {
            format!("{} • Thru {}", gross, self.thru)
        }
    }
}
