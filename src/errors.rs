use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid slicing axis '{axis}': must be one of {allowed:?}")]
    InvalidSlicingAxis { axis: String, allowed: Vec<String> },

    #[error("{coordinate} must be a fixed scalar for slicing axis '{axis}'")]
    InvalidCoordinate { coordinate: String, axis: String },

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("continuum colors must have {expected} entries, got {actual}")]
    InvalidColors { expected: usize, actual: usize },

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("equilibrium profile '{name}' has {actual} points, expected {expected}")]
    ProfileLengthMismatch { name: String, expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("figure is in state {state:?}, cannot {operation}")]
    FigureState { state: crate::visualisation::FigureState, operation: String },

    #[error("malformed eigenvalue log '{path}' at line {line}: {message}")]
    MalformedLogFile { path: String, line: usize, message: String },

    #[error("legolas exited with {status} for parfile '{parfile}'")]
    SolverFailed { status: String, parfile: String },

    #[error("spectra have different lengths: test has {test_len}, answer has {answer_len}")]
    SpectrumLengthMismatch { test_len: usize, answer_len: usize },

    #[error("rendering error: {0}")]
    Render(String),

    #[error("interpolation error: {0}")]
    Interp(String),

    #[error("{mismatches} of {total} eigenvalues differ beyond tolerance {tolerance:e} (worst |delta| = {worst:e})")]
    EigenvalueMismatch { mismatches: usize, total: usize, tolerance: f64, worst: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// plotters backends have error types parameterized on the backend, so they
// are flattened to a message here rather than carried by value.
impl Error {
    pub fn from_draw<E: std::fmt::Display>(error: E) -> Self {
        Error::Render(error.to_string())
    }
}
