//! Post-processing and visualization for Legolas MHD eigenmode solutions:
//! dataset handling, physical-space mode reconstruction, continuum bands,
//! figure/animation rendering and the external-solver regression harness.

mod errors;
pub use errors::{Error, Result};

mod dataset;
pub use dataset::{Geometry, LegolasDataset};

pub mod modes;
pub use modes::{ComplexPart, Coordinate, ModeVisualisationData, SlicingAxis};

pub mod continua;
pub use continua::{CONTINUA_NAMES, Continua, ContinuaHandler, calculate_continua};

pub mod visualisation;
pub use visualisation::{FigureState, ModeFigure, SlicePlot2D, SlicePlot3D, SolutionView};

pub mod solver;
pub use solver::{LegolasConfig, compare_eigenvalues, read_log_file, run_legolas};

/// Hook up env_logger once; repeated calls are harmless. Binaries and test
/// harnesses call this instead of depending on initialization order.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
