use crate::errors::{Error, Result};
use log::info;
use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

/// Run the external Legolas binary on a parfile and block until it exits.
/// A nonzero exit status is an error; there is no retry. When
/// `remove_parfile` is set the parfile is deleted after a successful run.
pub fn run_legolas(executable: &Path, parfile: &Path, remove_parfile: bool) -> Result<()> {
    info!("running {} -i {}", executable.display(), parfile.display());

    let timing_start: Instant = Instant::now();
    let status: ExitStatus = Command::new(executable).arg("-i").arg(parfile).status()?;
    let duration: Duration = timing_start.elapsed();
    info!("legolas finished in {:?}", duration);

    if !status.success() {
        return Err(Error::SolverFailed {
            status: status.to_string(),
            parfile: parfile.display().to_string(),
        });
    }

    if remove_parfile {
        fs::remove_file(parfile)?;
    }

    return Ok(());
}
