use crate::errors::{Error, Result};
use crate::modes::{ModeVisualisationData, SlicingAxis, meshgrid, mode_solution_stack, validate_slicing_axis};
use crate::visualisation::SolutionView;
use crate::visualisation::colormap::ColorMap;
use log::info;
use ndarray::{Array1, Array2, Array3, s};
use ndarray_stats::QuantileExt;
use num::complex::Complex64;
use plotters::prelude::*;
use std::path::Path;

/// Cartesian 3D view: the 2D slice solution repeated for every value of the
/// third coordinate and drawn as stacked translucent planes. Only slicing
/// along z is supported; unlike the 2D view the color limits are rescaled on
/// every frame.
pub struct SlicePlot3D {
    u1: Array1<f64>,
    u2: Array1<f64>,
    u3: Array1<f64>,
    ef_data: Array2<Complex64>,
    u2_data: Array2<f64>,
    solutions: Array3<f64>,
    explicit_clim: Option<(f64, f64)>,
    clim: (f64, f64),
}

impl SlicePlot3D {
    pub fn new(
        data: &ModeVisualisationData,
        ef_grid: &Array1<f64>,
        u2: Array1<f64>,
        u3: Array1<f64>,
        slicing_axis: SlicingAxis,
        clim: Option<(f64, f64)>,
    ) -> Result<SlicePlot3D> {
        if slicing_axis == SlicingAxis::Y {
            return Err(Error::NotImplemented("3D slicing along the y axis".to_string()));
        }
        validate_slicing_axis(slicing_axis, &[SlicingAxis::Z])?;

        let n_u1: usize = ef_grid.len();
        let n_u2: usize = u2.len();
        let n_u3: usize = u3.len();
        let (_u1_2d, u2_data): (Array2<f64>, Array2<f64>) = meshgrid(ef_grid, &u2);
        let ef_data: Array2<Complex64> = Array2::from_shape_fn((n_u1, n_u2), |(i_u1, _)| data.eigenfunction[i_u1]);

        return Ok(SlicePlot3D {
            u1: ef_grid.to_owned(),
            u2,
            u3,
            ef_data,
            u2_data,
            solutions: Array3::zeros((n_u1, n_u2, n_u3)),
            explicit_clim: clim,
            clim: (0.0, 0.0),
        });
    }

    pub fn solutions(&self) -> &Array3<f64> {
        return &self.solutions;
    }

    pub fn clim(&self) -> (f64, f64) {
        return self.clim;
    }
}

impl SolutionView for SlicePlot3D {
    fn set_time(&mut self, data: &ModeVisualisationData, t: f64) {
        self.solutions = mode_solution_stack(data, &self.ef_data, &self.u2_data, &self.u3, t);
        self.clim = self.explicit_clim.unwrap_or_else(|| self.solution_range());
    }

    fn solution_range(&self) -> (f64, f64) {
        let vmin: f64 = *self.solutions.min().unwrap_or(&0.0);
        let vmax: f64 = *self.solutions.max().unwrap_or(&0.0);
        return (vmin, vmax);
    }

    fn render(&self, path: &Path, figsize: (u32, u32), data: &ModeVisualisationData, t: f64, colormap: &ColorMap) -> Result<()> {
        let root = BitMapBackend::new(path, figsize).into_drawing_area();
        root.fill(&WHITE).map_err(Error::from_draw)?;

        // horizontal colorbar above the 3D axes
        let (cbar_row, view_area) = root.split_vertically(50);
        let cbar_area = cbar_row.margin(8, 8, 60, 60);

        let (vmin, vmax): (f64, f64) = self.clim;

        let x_min: f64 = *self.u1.min().map_err(Error::from_draw)?;
        let x_max: f64 = *self.u1.max().map_err(Error::from_draw)?;
        let y_min: f64 = *self.u2.min().map_err(Error::from_draw)?;
        let y_max: f64 = *self.u2.max().map_err(Error::from_draw)?;
        let z_min: f64 = *self.u3.min().map_err(Error::from_draw)?;
        let z_max: f64 = *self.u3.max().map_err(Error::from_draw)?;
        let z_pad: f64 = 0.05 * (z_max - z_min).max(1e-12);

        let mut chart = ChartBuilder::on(&view_area)
            .margin(15)
            .build_cartesian_3d(x_min..x_max, (z_min - z_pad)..(z_max + z_pad), y_min..y_max)
            .map_err(Error::from_draw)?;
        chart.configure_axes().draw().map_err(Error::from_draw)?;

        let n_u1: usize = self.u1.len();
        let n_u2: usize = self.u2.len();
        for (i_u3, &z_offset) in self.u3.iter().enumerate() {
            // deeper slices fade out, clamped so the far ones stay visible
            let alpha: f64 = (1.0 - 0.1 * i_u3 as f64).max(0.4);
            let slice = self.solutions.slice(s![.., .., i_u3]);
            for i_u1 in 0..n_u1.saturating_sub(1) {
                for i_u2 in 0..n_u2.saturating_sub(1) {
                    let color = colormap.value_to_color(slice[[i_u1, i_u2]], vmin, vmax).mix(alpha);
                    let corners: Vec<(f64, f64, f64)> = vec![
                        (self.u1[i_u1], z_offset, self.u2[i_u2]),
                        (self.u1[i_u1 + 1], z_offset, self.u2[i_u2]),
                        (self.u1[i_u1 + 1], z_offset, self.u2[i_u2 + 1]),
                        (self.u1[i_u1], z_offset, self.u2[i_u2 + 1]),
                    ];
                    chart
                        .draw_series(std::iter::once(Polygon::new(corners, color.filled())))
                        .map_err(Error::from_draw)?;
                }
            }
        }

        colormap.draw_colorbar_horizontal(&cbar_area, vmin, vmax)?;

        root.draw(&Text::new(format!("t = {:.2}", t), (figsize.0 as i32 - 90, 55), ("sans-serif", 15).into_font()))
            .map_err(Error::from_draw)?;
        root.draw(&Text::new(
            format!("omega = {:.5}{:+.5}i | k2 = {:.2} | k3 = {:.2}", data.omega.re, data.omega.im, data.k2, data.k3),
            (10, 55),
            ("sans-serif", 13).into_font(),
        ))
        .map_err(Error::from_draw)?;

        root.present().map_err(Error::from_draw)?;
        info!("3D view written to {}", path.display());
        return Ok(());
    }
}
