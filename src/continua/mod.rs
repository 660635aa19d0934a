mod cubic;
mod handler;

pub use handler::{CONTINUA_NAMES, ContinuaHandler, N_CONTINUA};

use crate::dataset::{Geometry, LegolasDataset};
use crate::errors::Result;
use cubic::solve_cubic;
use log::debug;
use ndarray::{Array1, Zip};
use num::complex::Complex64;

/// The MHD continuum bands of one equilibrium, sampled on the Gauss grid.
/// Slow and Alfven bands are Doppler-shifted real frequencies; the thermal
/// band holds the imaginary part of the thermal root.
#[derive(Debug, Clone)]
pub struct Continua {
    pub slow_min: Array1<f64>,
    pub slow_plus: Array1<f64>,
    pub alfven_min: Array1<f64>,
    pub alfven_plus: Array1<f64>,
    pub thermal: Array1<f64>,
    pub doppler: Array1<f64>,
}

impl Continua {
    /// Band lookup by display name, in the order of [`CONTINUA_NAMES`].
    pub fn band(&self, name: &str) -> Option<&Array1<f64>> {
        match name {
            "slow-" => Some(&self.slow_min),
            "slow+" => Some(&self.slow_plus),
            "alfven-" => Some(&self.alfven_min),
            "alfven+" => Some(&self.alfven_plus),
            "thermal" => Some(&self.thermal),
            "doppler" => Some(&self.doppler),
            _ => None,
        }
    }
}

/// Calculates the continuum bands from the equilibrium profiles.
///
/// With F = k2 * B02 / eps + k3 * B03 (eps is the grid for cylindrical
/// geometry, 1 for Cartesian):
///
/// * Alfven:  wA^2 = F^2 / rho
/// * slow:    wS^2 = gamma * p / (gamma * p + B0^2) * wA^2
/// * Doppler: Omega0 = k2 * v02 / eps + k3 * v03
///
/// and the +- bands are Omega0 +- sqrt(w^2). The thermal continuum vanishes
/// for an adiabatic or pressureless equilibrium; otherwise it is coupled to
/// the slow continuum and comes out of a per-gridpoint cubic.
pub fn calculate_continua(ds: &LegolasDataset) -> Result<Continua> {
    let n_gauss: usize = ds.gauss_gridpoints();

    let rho: Array1<f64> = ds.equilibrium("rho0");
    let b02: Array1<f64> = ds.equilibrium("B02");
    let b03: Array1<f64> = ds.equilibrium("B03");
    let b0: Array1<f64> = if ds.has_equilibrium("B0") {
        ds.equilibrium("B0")
    } else {
        (&b02 * &b02 + &b03 * &b03).mapv(f64::sqrt)
    };
    let v02: Array1<f64> = ds.equilibrium("v02");
    let v03: Array1<f64> = ds.equilibrium("v03");
    let temperature: Array1<f64> = ds.equilibrium("T0");
    let pressure: Array1<f64> = &rho * &temperature;

    let k2: f64 = ds.parameter("k2")?;
    let k3: f64 = ds.parameter("k3")?;
    let gamma: f64 = ds.gamma;

    // scale factor for the second coordinate
    let eps: Array1<f64> = match ds.geometry {
        Geometry::Cylindrical => ds.grid_gauss.clone(),
        Geometry::Cartesian => Array1::ones(n_gauss),
    };

    // parallel wave vector projection F = k . B
    let f_para: Array1<f64> = k2 * &b02 / &eps + k3 * &b03;
    let alfven2: Array1<f64> = &f_para * &f_para / &rho;
    let mut slow2: Array1<f64> = Array1::zeros(n_gauss);
    Zip::from(&mut slow2).and(&pressure).and(&b0).and(&alfven2).for_each(|value, &p, &b, &wa2| {
        let denominator: f64 = gamma * p + b * b;
        if denominator > 0.0 {
            *value = gamma * p / denominator * wa2;
        }
    });
    let doppler: Array1<f64> = k2 * &v02 / &eps + k3 * &v03;

    let thermal: Array1<f64> = thermal_continuum(ds, &rho, &b0, &f_para, &pressure, &alfven2);

    debug!("continua calculated on {} gridpoints", n_gauss);

    return Ok(Continua {
        slow_min: &doppler - &slow2.mapv(f64::sqrt),
        slow_plus: &doppler + &slow2.mapv(f64::sqrt),
        alfven_min: &doppler - &alfven2.mapv(f64::sqrt),
        alfven_plus: &doppler + &alfven2.mapv(f64::sqrt),
        thermal,
        doppler,
    });
}

/// The thermal continuum. In the adiabatic limit (no parallel conduction,
/// no heat-loss derivatives) the cubic factorizes into the slow pair plus a
/// zero root, so the band is identically zero; same for a pressureless
/// equilibrium. Otherwise each gridpoint solves
///
///   i rho (cs^2 + vA^2) / (gamma - 1) * w^3
///   + [(kappa_para kpara^2 + rho dLdT)(cs^2 + vA^2) + rho^2 dLdrho] * w^2
///   - i rho cs^2 wA^2 / (gamma - 1) * w
///   - [(kappa_para kpara^2 + rho dLdT) ci^2 + rho^2 dLdrho] * wA^2 = 0
///
/// and the thermal root is the (near) purely imaginary one.
fn thermal_continuum(
    ds: &LegolasDataset,
    rho: &Array1<f64>,
    b0: &Array1<f64>,
    f_para: &Array1<f64>,
    pressure: &Array1<f64>,
    alfven2: &Array1<f64>,
) -> Array1<f64> {
    let n_gauss: usize = ds.gauss_gridpoints();

    let kappa_para: Array1<f64> = ds.equilibrium("kappa_para");
    let dldt: Array1<f64> = ds.equilibrium("dLdT");
    let dldrho: Array1<f64> = ds.equilibrium("dLdrho");

    let adiabatic: bool = kappa_para.iter().all(|&value| value == 0.0)
        && dldt.iter().all(|&value| value == 0.0)
        && dldrho.iter().all(|&value| value == 0.0);
    let pressureless: bool = pressure.iter().all(|&value| value == 0.0);
    if adiabatic || pressureless {
        return Array1::zeros(n_gauss);
    }

    let gamma: f64 = ds.gamma;
    let i_unit: Complex64 = Complex64::i();

    let mut thermal: Array1<f64> = Array1::zeros(n_gauss);
    for i in 0..n_gauss {
        let cs2: f64 = gamma * pressure[i] / rho[i]; // adiabatic sound speed squared
        let ci2: f64 = pressure[i] / rho[i]; // isothermal sound speed squared
        let va2: f64 = b0[i] * b0[i] / rho[i]; // Alfven speed squared
        let kpara2: f64 = if b0[i] > 0.0 { (f_para[i] / b0[i]).powi(2) } else { 0.0 };

        // cold, field-free gridpoint: the cubic degenerates (zero leading
        // coefficient) and its surviving roots are all zero
        if cs2 + va2 == 0.0 {
            continue;
        }

        let heat_terms: f64 = kappa_para[i] * kpara2 + rho[i] * dldt[i];

        let a3: Complex64 = i_unit * rho[i] * (cs2 + va2) / (gamma - 1.0);
        let a2: Complex64 = Complex64::new(heat_terms * (cs2 + va2) + rho[i].powi(2) * dldrho[i], 0.0);
        let a1: Complex64 = -i_unit * rho[i] * cs2 * alfven2[i] / (gamma - 1.0);
        let a0: Complex64 = Complex64::new(-(heat_terms * ci2 + rho[i].powi(2) * dldrho[i]) * alfven2[i], 0.0);

        let roots: [Complex64; 3] = solve_cubic(a3, a2, a1, a0);
        thermal[i] = select_thermal_root(&roots).im;
    }

    return thermal;
}

/// The thermal root sits on the imaginary axis, while the slow pair has
/// finite real parts. Of the near-imaginary roots the one with the largest
/// damping/growth rate is the thermal one: with a vanishing magnetic field
/// the slow pair collapses onto zero roots on the same axis, and picking by
/// smallest |Re| alone would land on one of those instead.
fn select_thermal_root(roots: &[Complex64; 3]) -> Complex64 {
    let near_imaginary: Vec<Complex64> = roots
        .iter()
        .copied()
        .filter(|root| root.re.abs() <= 1e-8 * root.norm().max(1.0))
        .collect();
    if near_imaginary.is_empty() {
        return roots
            .iter()
            .copied()
            .min_by(|a, b| a.re.abs().partial_cmp(&b.re.abs()).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(Complex64::new(0.0, 0.0));
    }
    return near_imaginary
        .iter()
        .copied()
        .max_by(|a, b| a.im.abs().partial_cmp(&b.im.abs()).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(Complex64::new(0.0, 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn uniform_dataset() -> LegolasDataset {
        let grid: Array1<f64> = Array1::linspace(0.0, 1.0, 16);
        let mut ds: LegolasDataset = LegolasDataset::new(Geometry::Cartesian, 5.0 / 3.0, grid.clone(), grid.clone(), grid.clone());
        let n: usize = ds.gauss_gridpoints();
        ds.set_equilibrium("rho0", Array1::ones(n)).unwrap();
        ds.set_equilibrium("T0", Array1::ones(n)).unwrap();
        ds.set_equilibrium("B02", Array1::from_elem(n, 0.5)).unwrap();
        ds.set_equilibrium("B03", Array1::ones(n)).unwrap();
        ds.set_parameter("k2", 1.0);
        ds.set_parameter("k3", 2.0);
        return ds;
    }

    #[test]
    fn test_static_equilibrium_bands_are_symmetric() {
        let ds: LegolasDataset = uniform_dataset();
        let continua: Continua = calculate_continua(&ds).unwrap();

        // no flow: the +- bands are mirror images and Doppler shift is zero
        for i in 0..ds.gauss_gridpoints() {
            assert_abs_diff_eq!(continua.doppler[i], 0.0, epsilon = 1e-14);
            assert_abs_diff_eq!(continua.slow_min[i], -continua.slow_plus[i], epsilon = 1e-12);
            assert_abs_diff_eq!(continua.alfven_min[i], -continua.alfven_plus[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_uniform_alfven_continuum_value() {
        let ds: LegolasDataset = uniform_dataset();
        let continua: Continua = calculate_continua(&ds).unwrap();

        // rho = 1, F = k2 B02 + k3 B03 = 0.5 + 2 = 2.5
        for value in continua.alfven_plus.iter() {
            assert_abs_diff_eq!(*value, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_slow_is_below_alfven() {
        let ds: LegolasDataset = uniform_dataset();
        let continua: Continua = calculate_continua(&ds).unwrap();
        for i in 0..ds.gauss_gridpoints() {
            assert!(continua.slow_plus[i] <= continua.alfven_plus[i]);
        }
    }

    #[test]
    fn test_adiabatic_thermal_continuum_vanishes() {
        let ds: LegolasDataset = uniform_dataset();
        let continua: Continua = calculate_continua(&ds).unwrap();
        for value in continua.thermal.iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_nonadiabatic_thermal_continuum_is_finite() {
        let mut ds: LegolasDataset = uniform_dataset();
        let n: usize = ds.gauss_gridpoints();
        ds.set_equilibrium("dLdT", Array1::from_elem(n, 0.1)).unwrap();
        ds.set_equilibrium("dLdrho", Array1::from_elem(n, -0.05)).unwrap();

        let continua: Continua = calculate_continua(&ds).unwrap();
        assert!(continua.thermal.iter().all(|value| value.is_finite()));
        assert!(continua.thermal.iter().any(|&value| value.abs() > 0.0));
    }

    #[test]
    fn test_hydro_thermal_continuum_recovers_heating_rate() {
        // B = 0 with only dLdT live: the cubic reduces to
        // w^2 (a3 w + a2) = 0 and the thermal root is i (gamma - 1) dLdT
        let mut ds: LegolasDataset = uniform_dataset();
        let n: usize = ds.gauss_gridpoints();
        ds.set_equilibrium("B02", Array1::zeros(n)).unwrap();
        ds.set_equilibrium("B03", Array1::zeros(n)).unwrap();
        ds.set_equilibrium("dLdT", Array1::from_elem(n, 0.2)).unwrap();

        let continua: Continua = calculate_continua(&ds).unwrap();
        let expected: f64 = (ds.gamma - 1.0) * 0.2;
        for value in continua.thermal.iter() {
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_cold_field_free_gridpoint_stays_finite() {
        // a locally cold point in a field-free non-adiabatic profile must
        // not poison the band with NaN; its thermal value is zero
        let mut ds: LegolasDataset = uniform_dataset();
        let n: usize = ds.gauss_gridpoints();
        let mut temperature: Array1<f64> = Array1::ones(n);
        temperature[3] = 0.0;
        ds.set_equilibrium("T0", temperature).unwrap();
        ds.set_equilibrium("B02", Array1::zeros(n)).unwrap();
        ds.set_equilibrium("B03", Array1::zeros(n)).unwrap();
        ds.set_equilibrium("dLdT", Array1::from_elem(n, 0.2)).unwrap();

        let continua: Continua = calculate_continua(&ds).unwrap();
        assert!(continua.thermal.iter().all(|value| value.is_finite()));
        assert_abs_diff_eq!(continua.thermal[3], 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(continua.thermal[0], (ds.gamma - 1.0) * 0.2, epsilon = 1e-8);
    }

    #[test]
    fn test_band_lookup_order() {
        let ds: LegolasDataset = uniform_dataset();
        let continua: Continua = calculate_continua(&ds).unwrap();
        for name in CONTINUA_NAMES {
            assert!(continua.band(name).is_some());
        }
        assert!(continua.band("entropy").is_none());
    }
}
