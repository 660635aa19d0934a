use crate::errors::{Error, Result};
use log::warn;
use ndarray::Array1;
use num::complex::Complex64;
use std::fs;
use std::path::Path;

/// Parse a Legolas eigenvalue log: one `Re Im` pair per line, comma or
/// whitespace separated, `#` starting a comment line. With `sort` set the
/// spectrum is ordered by real part (ties by imaginary part), matching how
/// reference answers are stored.
pub fn read_log_file(path: &Path, sort: bool) -> Result<Array1<Complex64>> {
    let contents: String = fs::read_to_string(path)?;

    let mut eigenvalues: Vec<Complex64> = Vec::new();
    for (i_line, line) in contents.lines().enumerate() {
        let trimmed: &str = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split(|c: char| c == ',' || c.is_whitespace()).filter(|field| !field.is_empty()).collect();
        if fields.len() < 2 {
            return Err(Error::MalformedLogFile {
                path: path.display().to_string(),
                line: i_line + 1,
                message: format!("expected two floats, got '{}'", trimmed),
            });
        }
        let re: f64 = parse_float(fields[0], path, i_line)?;
        let im: f64 = parse_float(fields[1], path, i_line)?;
        eigenvalues.push(Complex64::new(re, im));
    }

    if eigenvalues.is_empty() {
        warn!("eigenvalue log {} contains no eigenvalues", path.display());
    }

    if sort {
        eigenvalues.sort_by(|a, b| (a.re, a.im).partial_cmp(&(b.re, b.im)).unwrap_or(std::cmp::Ordering::Equal));
    }

    return Ok(Array1::from(eigenvalues));
}

fn parse_float(field: &str, path: &Path, i_line: usize) -> Result<f64> {
    return field.parse::<f64>().map_err(|_| Error::MalformedLogFile {
        path: path.display().to_string(),
        line: i_line + 1,
        message: format!("'{}' is not a float", field),
    });
}

/// Elementwise comparison of a computed spectrum against a stored answer.
/// Each eigenvalue must satisfy |test - answer| <= tol * max(1, |answer|),
/// a relative tolerance with an absolute floor around zero. Reports the
/// number of offenders and the worst deviation; a length mismatch fails
/// immediately.
pub fn compare_eigenvalues(test: &Array1<Complex64>, answer: &Array1<Complex64>, tolerance: f64) -> Result<()> {
    if test.len() != answer.len() {
        return Err(Error::SpectrumLengthMismatch {
            test_len: test.len(),
            answer_len: answer.len(),
        });
    }

    let mut mismatches: usize = 0;
    let mut worst: f64 = 0.0;
    for (value_test, value_answer) in test.iter().zip(answer.iter()) {
        let delta: f64 = (value_test - value_answer).norm();
        let allowed: f64 = tolerance * value_answer.norm().max(1.0);
        if delta > allowed {
            mismatches += 1;
            if delta > worst {
                worst = delta;
            }
        }
    }

    if mismatches > 0 {
        return Err(Error::EigenvalueMismatch {
            mismatches,
            total: test.len(),
            tolerance,
            worst,
        });
    }

    return Ok(());
}
