mod logfile;
mod parfile;
mod runner;

pub use logfile::{compare_eigenvalues, read_log_file};
pub use parfile::LegolasConfig;
pub use runner::run_legolas;
