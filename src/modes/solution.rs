use crate::modes::ModeVisualisationData;
use ndarray::{Array1, Array2, Array3, Zip, s};
use num::complex::Complex64;
use rayon::prelude::*;

/// Meshgrid with "ij" indexing: element [i, j] of the outputs holds
/// (x[i], y[j]).
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let n_x: usize = x.len();
    let n_y: usize = y.len();

    let mut x_2d: Array2<f64> = Array2::zeros((n_x, n_y));
    let mut y_2d: Array2<f64> = Array2::zeros((n_x, n_y));
    for i_x in 0..n_x {
        for i_y in 0..n_y {
            x_2d[[i_x, i_y]] = x[i_x];
            y_2d[[i_x, i_y]] = y[i_y];
        }
    }

    return (x_2d, y_2d);
}

/// Reconstructs the physical-space mode amplitude on one slice:
///
/// solution = part[ ef * exp(i * (k2 * u2 + k3 * u3 - omega * t)) ]
///
/// `ef_data` is the eigenfunction broadcast over the sweep direction, and
/// `u2_data` / `u3_data` are the transverse coordinates on the same shape
/// (a fixed coordinate is simply constant over the slice). Pure function of
/// its inputs; identical inputs give identical output.
pub fn mode_solution_slice(data: &ModeVisualisationData, ef_data: &Array2<Complex64>, u2_data: &Array2<f64>, u3_data: &Array2<f64>, t: f64) -> Array2<f64> {
    let i_unit: Complex64 = Complex64::i();

    let mut solution: Array2<f64> = Array2::zeros(ef_data.raw_dim());
    Zip::from(&mut solution)
        .and(ef_data)
        .and(u2_data)
        .and(u3_data)
        .for_each(|value: &mut f64, &ef: &Complex64, &u2: &f64, &u3: &f64| {
            let phase: Complex64 = (i_unit * (data.k2 * u2 + data.k3 * u3) - i_unit * data.omega * t).exp();
            *value = data.part.extract(ef * phase);
        });

    return solution;
}

/// 3D variant: the slice computation repeated for every value of the third
/// coordinate and stacked into a trailing dimension. Slices are independent,
/// so they are computed in parallel.
pub fn mode_solution_stack(data: &ModeVisualisationData, ef_data: &Array2<Complex64>, u2_data: &Array2<f64>, u3: &Array1<f64>, t: f64) -> Array3<f64> {
    let (n_u1, n_u2): (usize, usize) = ef_data.dim();
    let n_u3: usize = u3.len();

    let slices: Vec<Array2<f64>> = (0..n_u3)
        .into_par_iter() // Use Rayon to create a parallel iterator
        .map(|i_u3: usize| {
            let u3_data: Array2<f64> = Array2::from_elem((n_u1, n_u2), u3[i_u3]);
            return mode_solution_slice(data, ef_data, u2_data, &u3_data, t);
        })
        .collect();

    let mut solutions: Array3<f64> = Array3::from_elem((n_u1, n_u2, n_u3), f64::NAN);
    for i_u3 in 0..n_u3 {
        solutions.slice_mut(s![.., .., i_u3]).assign(&slices[i_u3]);
    }

    return solutions;
}
