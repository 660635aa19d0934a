mod mode_data;
mod slicing;
mod solution;

pub use mode_data::{ComplexPart, ModeVisualisationData};
pub use slicing::{Coordinate, SlicingAxis, validate_coordinate, validate_slicing_axis};
pub use solution::{meshgrid, mode_solution_slice, mode_solution_stack};
