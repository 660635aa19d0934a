use crate::errors::{Error, Result};
use crate::modes::ModeVisualisationData;
use crate::visualisation::animation::{frame_path, stitch_frames};
use crate::visualisation::colormap::ColorMap;
use crate::visualisation::{FigureState, SolutionView};
use log::info;
use ndarray::Array1;
use std::fs;
use std::path::{Path, PathBuf};

/// Composes the mode data with one concrete solution view and drives the
/// figure lifecycle: Initialized -> DataSet -> Drawn -> (frame updates).
/// Out-of-order operations are errors rather than silent no-ops.
pub struct ModeFigure<V: SolutionView> {
    data: ModeVisualisationData,
    view: V,
    figsize: (u32, u32),
    colormap: ColorMap,
    state: FigureState,
    time: f64,
}

impl<V: SolutionView> ModeFigure<V> {
    pub fn new(data: ModeVisualisationData, view: V, figsize: (u32, u32)) -> ModeFigure<V> {
        return ModeFigure {
            data,
            view,
            figsize,
            colormap: ColorMap::new(),
            state: FigureState::Initialized,
            time: 0.0,
        };
    }

    pub fn state(&self) -> FigureState {
        return self.state;
    }

    pub fn data(&self) -> &ModeVisualisationData {
        return &self.data;
    }

    pub fn view(&self) -> &V {
        return &self.view;
    }

    /// Compute the solution at time `t` and move to the DataSet state.
    pub fn set_plot_data(&mut self, t: f64) {
        info!("setting plot data at t = {}", t);
        self.view.set_time(&self.data, t);
        self.time = t;
        if self.state == FigureState::Initialized {
            self.state = FigureState::DataSet;
        }
    }

    /// Render the current frame to `path`. Requires the data to be set.
    pub fn draw(&mut self, path: &Path) -> Result<()> {
        if self.state == FigureState::Initialized {
            return Err(Error::FigureState {
                state: self.state,
                operation: "draw before data is set".to_string(),
            });
        }
        self.view.render(path, self.figsize, &self.data, self.time, &self.colormap)?;
        self.state = FigureState::Drawn;
        return Ok(());
    }

    /// Advance the animation to time `t` and re-render in place. Only valid
    /// once a frame has been drawn.
    pub fn update_frame(&mut self, t: f64, path: &Path) -> Result<()> {
        if self.state != FigureState::Drawn {
            return Err(Error::FigureState {
                state: self.state,
                operation: "update a frame before drawing".to_string(),
            });
        }
        self.view.set_time(&self.data, t);
        self.time = t;
        return self.view.render(path, self.figsize, &self.data, self.time, &self.colormap);
    }

    /// Render one frame per requested time and stitch them into an MP4.
    /// Every frame is a full redraw of the solution at that time.
    pub fn create_animation(&mut self, times: &Array1<f64>, filename: &Path, fps: usize) -> Result<()> {
        if times.is_empty() {
            return Err(Error::Config("animation needs at least one time".to_string()));
        }

        let frames_dir: PathBuf = filename.with_extension("frames");
        fs::create_dir_all(&frames_dir)?;

        self.set_plot_data(times[0]);
        self.draw(&frame_path(&frames_dir, 0))?;
        for (i_frame, &t) in times.iter().enumerate().skip(1) {
            self.update_frame(t, &frame_path(&frames_dir, i_frame))?;
        }

        stitch_frames(&frames_dir, filename, fps)?;
        info!("animation with {} frames written to {}", times.len(), filename.display());
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::ComplexPart;
    use num::complex::Complex64;

    /// Minimal view that records calls instead of rendering pixels.
    struct ProbeView {
        set_times: Vec<f64>,
    }

    impl SolutionView for ProbeView {
        fn set_time(&mut self, _data: &ModeVisualisationData, t: f64) {
            self.set_times.push(t);
        }

        fn solution_range(&self) -> (f64, f64) {
            return (-1.0, 1.0);
        }

        fn render(&self, _path: &Path, _figsize: (u32, u32), _data: &ModeVisualisationData, _t: f64, _colormap: &ColorMap) -> Result<()> {
            return Ok(());
        }
    }

    fn probe_figure() -> ModeFigure<ProbeView> {
        let ef: Array1<Complex64> = Array1::from_elem(4, Complex64::new(1.0, 0.0));
        let data: ModeVisualisationData = ModeVisualisationData::new(ef, "rho", Complex64::new(1.0, 0.0), 1.0, 1.0, ComplexPart::Real);
        return ModeFigure::new(data, ProbeView { set_times: Vec::new() }, (640, 480));
    }

    #[test]
    fn test_draw_before_data_is_an_error() {
        let mut figure: ModeFigure<ProbeView> = probe_figure();
        assert_eq!(figure.state(), FigureState::Initialized);
        assert!(matches!(figure.draw(Path::new("/tmp/out.png")), Err(Error::FigureState { .. })));
    }

    #[test]
    fn test_update_before_draw_is_an_error() {
        let mut figure: ModeFigure<ProbeView> = probe_figure();
        figure.set_plot_data(0.0);
        assert_eq!(figure.state(), FigureState::DataSet);
        assert!(matches!(figure.update_frame(1.0, Path::new("/tmp/out.png")), Err(Error::FigureState { .. })));
    }

    #[test]
    fn test_lifecycle_reaches_drawn_and_updates() {
        let mut figure: ModeFigure<ProbeView> = probe_figure();
        figure.set_plot_data(0.0);
        figure.draw(Path::new("/tmp/out.png")).unwrap();
        assert_eq!(figure.state(), FigureState::Drawn);

        figure.update_frame(0.5, Path::new("/tmp/out.png")).unwrap();
        figure.update_frame(1.0, Path::new("/tmp/out.png")).unwrap();
        assert_eq!(figure.view().set_times, vec![0.0, 0.5, 1.0]);
    }
}
