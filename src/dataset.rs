use crate::errors::{Error, Result};
use ndarray::Array1;
use ndarray_interp::interp1d::Interp1D;
use std::collections::HashMap;

/// Coordinate system of the equilibrium. For cylindrical geometry the second
/// coordinate picks up a 1/r scale factor in the wave vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Cartesian,
    Cylindrical,
}

impl Geometry {
    pub fn from_name(name: &str) -> Result<Geometry> {
        match name {
            "Cartesian" => Ok(Geometry::Cartesian),
            "cylindrical" => Ok(Geometry::Cylindrical),
            other => Err(Error::Config(format!("unknown geometry '{}'", other))),
        }
    }
}

/// In-memory view of a Legolas run: grids, equilibrium profiles on the Gauss
/// grid and scalar parameters. The solver's binary datfile format is an
/// upstream concern; datasets are assembled from parsed output or constructed
/// directly (e.g. in tests).
#[derive(Debug, Clone)]
pub struct LegolasDataset {
    pub geometry: Geometry,
    pub gamma: f64,
    /// Base grid of the simulation.
    pub grid: Array1<f64>,
    /// Grid on which the eigenfunctions are sampled.
    pub ef_grid: Array1<f64>,
    /// Gaussian quadrature grid on which the equilibria are sampled.
    pub grid_gauss: Array1<f64>,
    equilibria: HashMap<String, Array1<f64>>,
    parameters: HashMap<String, f64>,
}

impl LegolasDataset {
    pub fn new(geometry: Geometry, gamma: f64, grid: Array1<f64>, ef_grid: Array1<f64>, grid_gauss: Array1<f64>) -> LegolasDataset {
        return LegolasDataset {
            geometry,
            gamma,
            grid,
            ef_grid,
            grid_gauss,
            equilibria: HashMap::new(),
            parameters: HashMap::new(),
        };
    }

    pub fn gauss_gridpoints(&self) -> usize {
        return self.grid_gauss.len();
    }

    /// Store an equilibrium profile, sampled on the Gauss grid.
    pub fn set_equilibrium(&mut self, name: &str, profile: Array1<f64>) -> Result<()> {
        let n_gauss: usize = self.gauss_gridpoints();
        if profile.len() != n_gauss {
            return Err(Error::ProfileLengthMismatch {
                name: name.to_string(),
                expected: n_gauss,
                actual: profile.len(),
            });
        }
        self.equilibria.insert(name.to_string(), profile);
        return Ok(());
    }

    /// Equilibrium profile by name. Optional profiles (heat-loss derivatives,
    /// parallel conduction) default to zero when the run did not write them.
    pub fn equilibrium(&self, name: &str) -> Array1<f64> {
        match self.equilibria.get(name) {
            Some(profile) => profile.to_owned(),
            None => Array1::zeros(self.gauss_gridpoints()),
        }
    }

    pub fn has_equilibrium(&self, name: &str) -> bool {
        return self.equilibria.contains_key(name);
    }

    pub fn set_parameter(&mut self, name: &str, value: f64) {
        self.parameters.insert(name.to_string(), value);
    }

    pub fn parameter(&self, name: &str) -> Result<f64> {
        return self.parameters.get(name).copied().ok_or_else(|| Error::UnknownParameter(name.to_string()));
    }

    pub fn parameters(&self) -> &HashMap<String, f64> {
        return &self.parameters;
    }

    /// Interpolate a Gauss-grid profile onto the eigenfunction grid,
    /// e.g. for overlaying continua on an eigenfunction panel.
    pub fn interp_to_ef_grid(&self, profile: &Array1<f64>) -> Result<Array1<f64>> {
        let interpolator = Interp1D::builder(profile.to_owned())
            .x(self.grid_gauss.clone())
            .build()
            .map_err(|error| Error::Interp(error.to_string()))?;
        let result: Array1<f64> = interpolator
            .interp_array(&self.ef_grid)
            .map_err(|error| Error::Interp(error.to_string()))?;
        return Ok(result);
    }
}

#[test]
fn test_equilibrium_defaults_to_zero() {
    let grid: Array1<f64> = Array1::linspace(0.0, 1.0, 11);
    let ds: LegolasDataset = LegolasDataset::new(Geometry::Cartesian, 5.0 / 3.0, grid.clone(), grid.clone(), grid.clone());

    let dldt: Array1<f64> = ds.equilibrium("dLdT");
    assert_eq!(dldt.len(), 11);
    assert!(dldt.iter().all(|&value| value == 0.0));
    assert!(!ds.has_equilibrium("dLdT"));
}

#[test]
fn test_profile_length_is_validated() {
    let grid: Array1<f64> = Array1::linspace(0.0, 1.0, 11);
    let mut ds: LegolasDataset = LegolasDataset::new(Geometry::Cartesian, 5.0 / 3.0, grid.clone(), grid.clone(), grid.clone());

    let wrong: Array1<f64> = Array1::zeros(7);
    assert!(ds.set_equilibrium("rho0", wrong).is_err());
}

#[test]
fn test_interp_to_ef_grid_is_exact_for_linear_profiles() {
    use approx::assert_abs_diff_eq;

    let grid_gauss: Array1<f64> = Array1::linspace(0.0, 1.0, 21);
    let ef_grid: Array1<f64> = Array1::linspace(0.05, 0.95, 10);
    let ds: LegolasDataset = LegolasDataset::new(Geometry::Cartesian, 5.0 / 3.0, grid_gauss.clone(), ef_grid.clone(), grid_gauss.clone());

    let profile: Array1<f64> = 2.0 * &grid_gauss + 1.0;
    let interpolated: Array1<f64> = ds.interp_to_ef_grid(&profile).unwrap();
    for (i, &x) in ef_grid.iter().enumerate() {
        assert_abs_diff_eq!(interpolated[i], 2.0 * x + 1.0, epsilon = 1e-12);
    }
}
