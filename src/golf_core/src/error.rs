use thiserror::Error;

/// Errors raised by validation and document loading.
///
/// The scoring arithmetic itself never fails; only preconditions that the
/// admin page enforced before creating a tournament are reported here.
#[derive(Error, Debug)]
pub enum GolfError {
    #[error("Stroke Index must contain 18 unique values.")]
    StrokeIndexNotUnique,

    #[error("Stroke Index values must be integers 1–18 (got {value}).")]
    StrokeIndexOutOfRange { value: f64 },

    #[error("Tournament name is required.")]
    MissingTournamentName,

    #[error("Add at least one round with positive weight.")]
    NoActiveRounds,

    #[error("Invalid score {input:?}: expected blank or a whole number 1–{max}")]
    InvalidScore { input: String, max: u32 },

    #[error("Round {index} does not exist")]
    UnknownRound { index: usize },

    #[error("Unknown {kind} id: {id}")]
    UnknownTarget { kind: &'static str, id: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GolfError {
    /// True for errors caused by bad caller input rather than lookups, JSON or I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GolfError::StrokeIndexNotUnique
                | GolfError::StrokeIndexOutOfRange { .. }
                | GolfError::MissingTournamentName
                | GolfError::NoActiveRounds
                | GolfError::InvalidScore { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GolfError>;
