use crate::errors::{Error, Result};
use crate::modes::{Coordinate, ModeVisualisationData, SlicingAxis, meshgrid, mode_solution_slice, validate_coordinate, validate_slicing_axis};
use crate::visualisation::colormap::ColorMap;
use crate::visualisation::SolutionView;
use log::info;
use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;
use num::complex::Complex64;
use plotters::prelude::*;
use std::path::Path;

/// Cartesian 2D slice of the eigenmode solution: the eigenfunction varies
/// along u1 (the grid), one transverse coordinate is swept and the slicing
/// axis coordinate is held fixed. Renders as an eigenfunction panel on top
/// of a solution heatmap with a shared colorbar on the right.
pub struct SlicePlot2D {
    slicing_axis: SlicingAxis,
    u1: Array1<f64>,
    sweep: Array1<f64>,
    sweep_label: &'static str,
    u2_fixed: Option<f64>,
    u3_fixed: Option<f64>,
    ef_data: Array2<Complex64>,
    u2_data: Array2<f64>,
    u3_data: Array2<f64>,
    solution: Array2<f64>,
    // clim is frozen on the first solve so animation frames share one scale
    clim: Option<(f64, f64)>,
}

impl SlicePlot2D {
    pub fn new(data: &ModeVisualisationData, ef_grid: &Array1<f64>, u2: Coordinate, u3: Coordinate, slicing_axis: SlicingAxis) -> Result<SlicePlot2D> {
        let slicing_axis: SlicingAxis = validate_slicing_axis(slicing_axis, &[SlicingAxis::Y, SlicingAxis::Z])?;
        validate_coordinate("u2", &u2, SlicingAxis::Y, slicing_axis)?;
        validate_coordinate("u3", &u3, SlicingAxis::Z, slicing_axis)?;

        // the coordinate not on the slicing axis is the sweep direction
        let (sweep, sweep_label): (Array1<f64>, &'static str) = match slicing_axis {
            SlicingAxis::Z => (u2.values(), "y"),
            _ => (u3.values(), "z"),
        };

        let n_u1: usize = ef_grid.len();
        let n_sweep: usize = sweep.len();
        let (_u1_2d, sweep_2d): (Array2<f64>, Array2<f64>) = meshgrid(ef_grid, &sweep);

        let u2_data: Array2<f64> = match &u2 {
            Coordinate::Fixed(value) => Array2::from_elem((n_u1, n_sweep), *value),
            Coordinate::Sweep(_) => sweep_2d.clone(),
        };
        let u3_data: Array2<f64> = match &u3 {
            Coordinate::Fixed(value) => Array2::from_elem((n_u1, n_sweep), *value),
            Coordinate::Sweep(_) => sweep_2d,
        };
        let ef_data: Array2<Complex64> = Array2::from_shape_fn((n_u1, n_sweep), |(i_u1, _)| data.eigenfunction[i_u1]);

        return Ok(SlicePlot2D {
            slicing_axis,
            u1: ef_grid.to_owned(),
            sweep,
            sweep_label,
            u2_fixed: u2.fixed_value(),
            u3_fixed: u3.fixed_value(),
            ef_data,
            u2_data,
            u3_data,
            solution: Array2::zeros((n_u1, n_sweep)),
            clim: None,
        });
    }

    pub fn slicing_axis(&self) -> SlicingAxis {
        return self.slicing_axis;
    }

    pub fn solution(&self) -> &Array2<f64> {
        return &self.solution;
    }

    fn coordinate_text(&self) -> String {
        match self.slicing_axis {
            SlicingAxis::Z => format!("z = {:.2}", self.u3_fixed.unwrap_or(0.0)),
            _ => format!("y = {:.2}", self.u2_fixed.unwrap_or(0.0)),
        }
    }
}

impl SolutionView for SlicePlot2D {
    fn set_time(&mut self, data: &ModeVisualisationData, t: f64) {
        self.solution = mode_solution_slice(data, &self.ef_data, &self.u2_data, &self.u3_data, t);
        if self.clim.is_none() {
            self.clim = Some(self.solution_range());
        }
    }

    fn solution_range(&self) -> (f64, f64) {
        let vmin: f64 = *self.solution.min().unwrap_or(&0.0);
        let vmax: f64 = *self.solution.max().unwrap_or(&0.0);
        return (vmin, vmax);
    }

    fn render(&self, path: &Path, figsize: (u32, u32), data: &ModeVisualisationData, t: f64, colormap: &ColorMap) -> Result<()> {
        let root = BitMapBackend::new(path, figsize).into_drawing_area();
        root.fill(&WHITE).map_err(Error::from_draw)?;

        // mosaic: eigenfunction panel on top, view twice as tall below,
        // colorbar strip carved from the view's right edge
        let (ef_area, view_row) = root.split_vertically(figsize.1 / 3);
        let (view_area, cbar_area) = view_row.split_horizontally(figsize.0 as i32 - 70);
        let cbar_area = cbar_area.margin(20, 20, 5, 5);

        let (vmin, vmax): (f64, f64) = self.clim.unwrap_or_else(|| self.solution_range());

        let x_min: f64 = *self.u1.min().map_err(Error::from_draw)?;
        let x_max: f64 = *self.u1.max().map_err(Error::from_draw)?;

        // eigenfunction panel
        {
            let ef_part: Array1<f64> = data.eigenfunction_part();
            let ef_min: f64 = *ef_part.min().map_err(Error::from_draw)?;
            let ef_max: f64 = *ef_part.max().map_err(Error::from_draw)?;
            let pad: f64 = 0.05 * (ef_max - ef_min).max(1e-12);

            let mut chart = ChartBuilder::on(&ef_area)
                .margin(10)
                .x_label_area_size(25)
                .y_label_area_size(50)
                .build_cartesian_2d(x_min..x_max, (ef_min - pad)..(ef_max + pad))
                .map_err(Error::from_draw)?;
            chart
                .configure_mesh()
                .y_desc(format!("{}({})", data.part.as_str(), data.ef_name))
                .draw()
                .map_err(Error::from_draw)?;
            chart
                .draw_series(LineSeries::new(self.u1.iter().zip(ef_part.iter()).map(|(&x, &y)| (x, y)), BLUE.stroke_width(2)))
                .map_err(Error::from_draw)?;
            // guide line at x = 0 when it lies inside the grid
            if x_min < 0.0 && x_max > 0.0 {
                chart
                    .draw_series(LineSeries::new([(0.0, ef_min - pad), (0.0, ef_max + pad)], &full_palette::GREY))
                    .map_err(Error::from_draw)?;
            }
        }

        // solution heatmap
        {
            let y_min: f64 = *self.sweep.min().map_err(Error::from_draw)?;
            let y_max: f64 = *self.sweep.max().map_err(Error::from_draw)?;

            let mut chart = ChartBuilder::on(&view_area)
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(Error::from_draw)?;
            chart.configure_mesh().x_desc("x").y_desc(self.sweep_label).draw().map_err(Error::from_draw)?;

            let n_u1: usize = self.u1.len();
            let n_sweep: usize = self.sweep.len();
            for i_u1 in 0..n_u1.saturating_sub(1) {
                for i_sweep in 0..n_sweep.saturating_sub(1) {
                    let color: RGBColor = colormap.value_to_color(self.solution[[i_u1, i_sweep]], vmin, vmax);
                    chart
                        .draw_series(std::iter::once(Rectangle::new(
                            [(self.u1[i_u1], self.sweep[i_sweep]), (self.u1[i_u1 + 1], self.sweep[i_sweep + 1])],
                            color.filled(),
                        )))
                        .map_err(Error::from_draw)?;
                }
            }
        }

        colormap.draw_colorbar_vertical(&cbar_area, vmin, vmax)?;

        // annotations: eigenfrequency, wave vector, slice position and time
        root.draw(&Text::new(
            format!("omega = {:.5}{:+.5}i", data.omega.re, data.omega.im),
            (10, 5),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(Error::from_draw)?;
        root.draw(&Text::new(
            format!("k2 = {:.2} | k3 = {:.2}", data.k2, data.k3),
            (10, figsize.1 as i32 - 20),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(Error::from_draw)?;
        root.draw(&Text::new(
            format!("{} | t = {:.2}", self.coordinate_text(), t),
            (figsize.0 as i32 - 200, 5),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(Error::from_draw)?;

        root.present().map_err(Error::from_draw)?;
        info!("2D slice written to {}", path.display());
        return Ok(());
    }
}
