mod animation;
mod colormap;
mod figure;
mod slice_2d;
mod slice_3d;

pub use colormap::ColorMap;
pub use figure::ModeFigure;
pub use slice_2d::SlicePlot2D;
pub use slice_3d::SlicePlot3D;

use crate::errors::Result;
use crate::modes::ModeVisualisationData;
use std::path::Path;

/// Lifecycle of a figure: data must be set before drawing, and frame updates
/// only make sense once a frame has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureState {
    Initialized,
    DataSet,
    Drawn,
}

/// A renderable solution panel. The original design shared layout code
/// through an inheritance chain; here each concrete view supplies its own
/// layout, data assignment and draw behaviour, and [`ModeFigure`] composes
/// one of them with the mode data and the state machine.
pub trait SolutionView {
    /// Recompute the physical-space solution at time `t`.
    fn set_time(&mut self, data: &ModeVisualisationData, t: f64);

    /// Min/max of the current solution, for the shared color normalization.
    fn solution_range(&self) -> (f64, f64);

    /// Render one full frame (panels, colorbar, annotations) as a PNG.
    /// Filled cell series cannot be mutated in place, so every call is a
    /// complete redraw.
    fn render(&self, path: &Path, figsize: (u32, u32), data: &ModeVisualisationData, t: f64, colormap: &ColorMap) -> Result<()>;
}
