use crate::errors::{Error, Result};
use ndarray::Array1;

/// The coordinate direction which is held fixed in a slice view. The mode
/// solution is always a function of the grid coordinate u1; of the two
/// transverse directions one is swept and the other is the slicing axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicingAxis {
    X,
    Y,
    Z,
}

impl SlicingAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlicingAxis::X => "x",
            SlicingAxis::Y => "y",
            SlicingAxis::Z => "z",
        }
    }
}

/// A transverse coordinate: either held fixed at a scalar value or swept
/// along an array of values.
#[derive(Debug, Clone)]
pub enum Coordinate {
    Fixed(f64),
    Sweep(Array1<f64>),
}

impl Coordinate {
    pub fn is_fixed(&self) -> bool {
        return matches!(self, Coordinate::Fixed(_));
    }

    /// The fixed value, if this coordinate is fixed.
    pub fn fixed_value(&self) -> Option<f64> {
        match self {
            Coordinate::Fixed(value) => Some(*value),
            Coordinate::Sweep(_) => None,
        }
    }

    /// The swept values, with a fixed scalar treated as a length-1 sweep.
    pub fn values(&self) -> Array1<f64> {
        match self {
            Coordinate::Fixed(value) => Array1::from(vec![*value]),
            Coordinate::Sweep(values) => values.to_owned(),
        }
    }
}

pub fn validate_slicing_axis(axis: SlicingAxis, allowed: &[SlicingAxis]) -> Result<SlicingAxis> {
    if !allowed.contains(&axis) {
        return Err(Error::InvalidSlicingAxis {
            axis: axis.as_str().to_string(),
            allowed: allowed.iter().map(|a| a.as_str().to_string()).collect(),
        });
    }
    return Ok(axis);
}

/// A coordinate lying along the slicing axis must be a fixed scalar; the
/// sweep happens along the other transverse direction.
pub fn validate_coordinate<'a>(name: &str, coordinate: &'a Coordinate, coordinate_axis: SlicingAxis, slicing_axis: SlicingAxis) -> Result<&'a Coordinate> {
    if slicing_axis == coordinate_axis && !coordinate.is_fixed() {
        return Err(Error::InvalidCoordinate {
            coordinate: name.to_string(),
            axis: coordinate_axis.as_str().to_string(),
        });
    }
    return Ok(coordinate);
}
