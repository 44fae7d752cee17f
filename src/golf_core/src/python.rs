//! Python bindings.

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::ViewMode;
use crate::constants::{HOLE_COUNT, MAX_HOLE_SCORE, MAX_TOP_X};
use crate::course::Course;
use crate::error::GolfError;
use crate::leaderboard::LeaderboardRow;
use crate::round::{AggregationMode, TeamAggregation};
use crate::scorecard::Scorecard;
use crate::tournament::{RoundView, TournamentState};

impl From<GolfError> for PyErr {
    fn from(err: GolfError) -> PyErr {
        if err.is_validation() {
            return PyValueError::new_err(err.to_string());
        }
        match err {
            GolfError::Io(_) => PyIOError::new_err(err.to_string()),
            GolfError::Json(_) => PyValueError::new_err(err.to_string()),
            _ => PyKeyError::new_err(err.to_string()),
        }
    }
}

fn parse_view(view: &str) -> PyResult<ViewMode> {
    match view {
        "team" => Ok(ViewMode::Team),
        "player" => Ok(ViewMode::Player),
        other => Err(PyValueError::new_err(format!("unknown view: {}", other))),
    }
}

fn parse_mode(mode: &str) -> PyResult<AggregationMode> {
    mode.parse().map_err(PyValueError::new_err)
}

#[pyclass(name = "Course")]
#[derive(Clone, Debug)]
pub struct PyCourse {
    inner: Course,
}

#[pymethods]
impl PyCourse {
    /// Create a course. Missing pars default to 4; the stroke index must be a
    /// permutation of 1..=18.
    #[new]
    #[pyo3(signature = (pars, stroke_index = None))]
    fn new(pars: Vec<u32>, stroke_index: Option<Vec<i64>>) -> PyResult<Self> {
        let si = stroke_index.unwrap_or_else(|| (1..=HOLE_COUNT as i64).collect());
        Ok(PyCourse {
            inner: Course::new(pars, &si)?,
        })
    }

    #[getter]
    fn pars(&self) -> Vec<u32> {
        self.inner.pars.clone()
    }

    #[getter]
    fn stroke_index(&self) -> Vec<u32> {
        self.inner.stroke_index.clone()
    }

    fn par_total(&self) -> u32 {
        self.inner.par_total()
    }

    #[pyo3(signature = (gross, handicap = 0.0, use_handicap = false))]
    fn scorecard(&self, gross: Vec<Option<i32>>, handicap: f64, use_handicap: bool) -> PyScorecard {
        PyScorecard {
            inner: Scorecard::build(&self.inner, &gross, handicap, use_handicap),
        }
    }
}

#[pyclass(name = "Scorecard")]
#[derive(Clone, Debug)]
pub struct PyScorecard {
    inner: Scorecard,
}

#[pymethods]
impl PyScorecard {
    #[getter]
    fn gross(&self) -> Vec<Option<i32>> {
        self.inner.gross.clone()
    }

    #[getter]
    fn net(&self) -> Vec<Option<i32>> {
        self.inner.net.clone()
    }

    #[getter]
    fn strokes(&self) -> Vec<u32> {
        self.inner.strokes.clone()
    }

    #[getter]
    fn dots(&self) -> Vec<&'static str> {
        self.inner.dots.clone()
    }

    #[getter]
    fn thru(&self) -> usize {
        self.inner.thru
    }

    #[getter]
    fn gross_total(&self) -> i32 {
        self.inner.gross_totals.total
    }

    #[getter]
    fn net_total(&self) -> i32 {
        self.inner.net_totals.total
    }

    #[getter]
    fn gross_to_par(&self) -> String {
        self.inner.gross_totals.to_par()
    }

    #[getter]
    fn net_to_par(&self) -> String {
        self.inner.net_totals.to_par()
    }

    fn summary_line(&self) -> String {
        self.inner.summary_line()
    }

    fn __repr__(&self) -> String {
        format!("Scorecard({})", self.inner.summary_line())
    }
}

#[pyclass(name = "Tournament")]
#[derive(Clone, Debug)]
pub struct PyTournament {
    inner: TournamentState,
}

fn row_to_tuple(row: &LeaderboardRow) -> (String, String, String, String, String, String, String) {
    (
        row.position_display(),
        row.standing.id.clone(),
        row.standing.name.clone(),
        row.to_par_display(),
        row.thru_display(),
        row.gross_to_par_display(),
        row.net_to_par_display(),
    )
}

#[pymethods]
impl PyTournament {
    /// Load a tournament document from its JSON text.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        Ok(PyTournament {
            inner: TournamentState::from_json_str(json)?,
        })
    }

    #[staticmethod]
    fn from_file(path: &str) -> PyResult<Self> {
        Ok(PyTournament {
            inner: TournamentState::from_file(path)?,
        })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.tournament.name.clone()
    }

    fn newest_round_with_data(&self) -> Option<usize> {
        self.inner.newest_round_with_data()
    }

    fn set_scores(&mut self, round: usize, view: &str, target_id: &str, gross: Vec<Option<i32>>) -> PyResult<()> {
        Ok(self.inner.set_scores(round, parse_view(view)?, target_id, gross)?)
    }

    fn scorecard(&self, round: usize, view: &str, target_id: &str) -> PyResult<PyScorecard> {
        Ok(PyScorecard {
            inner: self.inner.scorecard(round, parse_view(view)?, target_id)?,
        })
    }

    /// Leaderboard rows as (pos, id, name, to_par, thru, gross_to_par, net_to_par).
    ///
    /// `round` of None means all active rounds, weighted.
    #[pyo3(signature = (view = "player", round = None))]
    fn leaderboard(
        &self,
        view: &str,
        round: Option<usize>,
    ) -> PyResult<Vec<(String, String, String, String, String, String, String)>> {
        let rounds = round.map_or(RoundView::All, RoundView::Round);
        let rows = self.inner.leaderboard(parse_view(view)?, rounds)?;
        Ok(rows.iter().map(row_to_tuple).collect())
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pyfunction]
fn strokes_per_hole(handicap: f64, stroke_index: Vec<u32>) -> Vec<u32> {
    crate::handicap::strokes_per_hole(handicap, &stroke_index)
}

#[pyfunction]
fn net_scores(gross: Vec<Option<i32>>, strokes: Vec<u32>) -> Vec<Option<i32>> {
    crate::handicap::net_scores(&gross, &strokes)
}

#[pyfunction]
fn to_par(total: i32, par_total: i32) -> String {
    crate::totals::to_par(total, par_total)
}

#[pyfunction]
fn format_to_par(diff: f64) -> String {
    crate::totals::format_to_par_f64(diff)
}

#[pyfunction]
fn dots_for_strokes(strokes: u32) -> &'static str {
    crate::dots::dots_for_strokes(strokes)
}

#[pyfunction]
#[pyo3(signature = (scores, top_x = 4, mode = "sum"))]
fn aggregate_team_score(scores: Vec<i32>, top_x: i64, mode: &str) -> PyResult<Option<f64>> {
    let agg = TeamAggregation::new(parse_mode(mode)?, top_x);
    Ok(crate::aggregation::aggregate_team_score(&scores, &agg))
}

#[pyfunction]
fn validate_stroke_index(stroke_index: Vec<i64>) -> PyResult<Vec<u32>> {
    Ok(crate::course::validate_stroke_index(&stroke_index)?)
}

#[pyfunction]
fn parse_score_input(input: &str) -> PyResult<Option<i32>> {
    Ok(crate::entry::parse_score_input(input)?)
}

/// Python module definition
#[pymodule]
fn golf_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyCourse>()?;
    m.add_class::<PyScorecard>()?;
    m.add_class::<PyTournament>()?;

    // Scoring functions
    m.add_function(wrap_pyfunction!(strokes_per_hole, m)?)?;
    m.add_function(wrap_pyfunction!(net_scores, m)?)?;
    m.add_function(wrap_pyfunction!(to_par, m)?)?;
    m.add_function(wrap_pyfunction!(format_to_par, m)?)?;
    m.add_function(wrap_pyfunction!(dots_for_strokes, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate_team_score, m)?)?;
    m.add_function(wrap_pyfunction!(validate_stroke_index, m)?)?;
    m.add_function(wrap_pyfunction!(parse_score_input, m)?)?;

    // Constants
    m.add("HOLE_COUNT", HOLE_COUNT)?;
    m.add("MAX_HOLE_SCORE", MAX_HOLE_SCORE)?;
    m.add("MAX_TOP_X", MAX_TOP_X)?;

    Ok(())
}
