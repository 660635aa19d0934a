use ndarray::Array1;
use num::complex::Complex64;

/// Which part of the complex mode solution is visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexPart {
    Real,
    Imaginary,
}

impl ComplexPart {
    pub fn extract(&self, value: Complex64) -> f64 {
        match self {
            ComplexPart::Real => value.re,
            ComplexPart::Imaginary => value.im,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexPart::Real => "Re",
            ComplexPart::Imaginary => "Im",
        }
    }
}

/// Everything needed to reconstruct one eigenmode in physical space: the
/// complex eigenfunction sampled on the eigenfunction grid, the eigenvalue
/// and the wave vector components. Treated as immutable once built.
#[derive(Debug, Clone)]
pub struct ModeVisualisationData {
    pub eigenfunction: Array1<Complex64>,
    /// Name of the perturbed quantity, e.g. "rho" or "v1".
    pub ef_name: String,
    pub omega: Complex64,
    pub k2: f64,
    pub k3: f64,
    pub part: ComplexPart,
}

impl ModeVisualisationData {
    pub fn new(eigenfunction: Array1<Complex64>, ef_name: &str, omega: Complex64, k2: f64, k3: f64, part: ComplexPart) -> ModeVisualisationData {
        return ModeVisualisationData {
            eigenfunction,
            ef_name: ef_name.to_string(),
            omega,
            k2,
            k3,
            part,
        };
    }

    /// The visualized part of the raw eigenfunction, for the curve panel.
    pub fn eigenfunction_part(&self) -> Array1<f64> {
        return self.eigenfunction.mapv(|value: Complex64| self.part.extract(value));
    }
}
