use crate::errors::{Error, Result};
use ndarray::Array1;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{Rectangle, Text};
use plotters::style::{Color, IntoFont, RGBColor, ShapeStyle};

/// Diverging colormap plus colorbar rendering. Wraps a `colorgrad` gradient
/// as a boxed trait object so presets stay interchangeable.
pub struct ColorMap {
    gradient: Box<dyn colorgrad::Gradient>,
}

impl ColorMap {
    pub fn new() -> ColorMap {
        return ColorMap {
            gradient: Box::new(colorgrad::preset::rd_yl_bu()),
        };
    }

    /// Map a value onto the gradient given the color limits. Degenerate
    /// limits (vmin == vmax) land mid-scale.
    pub fn value_to_color(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        let normalized: f64 = if vmax > vmin { (value - vmin) / (vmax - vmin) } else { 0.5 };
        let normalized: f64 = normalized.clamp(0.0, 1.0);
        // reverse so that high values come out red
        let rgba: [u8; 4] = self.gradient.at(1.0 - normalized as f32).to_rgba8();
        return RGBColor(rgba[0], rgba[1], rgba[2]);
    }

    /// Draw a vertical colorbar (low at the bottom) filling `area`, with tick
    /// labels along the right edge.
    pub fn draw_colorbar_vertical<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, vmin: f64, vmax: f64) -> Result<()> {
        let (width, height): (u32, u32) = area.dim_in_pixel();
        let bar_width: i32 = (width as i32 - 35).max(4);

        for y in 0..height as i32 {
            let fraction: f64 = 1.0 - y as f64 / height.max(1) as f64;
            let value: f64 = vmin + fraction * (vmax - vmin);
            let style: ShapeStyle = self.value_to_color(value, vmin, vmax).filled();
            area.draw(&Rectangle::new([(0, y), (bar_width, y + 1)], style)).map_err(Error::from_draw)?;
        }

        for (value, fraction) in colorbar_ticks(vmin, vmax) {
            let y: i32 = ((1.0 - fraction) * (height.saturating_sub(1)) as f64) as i32;
            area.draw(&Text::new(format!("{:.2}", value), (bar_width + 2, y - 5), ("sans-serif", 11).into_font()))
                .map_err(Error::from_draw)?;
        }

        return Ok(());
    }

    /// Horizontal variant (low on the left), labels underneath. Used by the
    /// 3D view which puts the bar above the axes.
    pub fn draw_colorbar_horizontal<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, vmin: f64, vmax: f64) -> Result<()> {
        let (width, height): (u32, u32) = area.dim_in_pixel();
        let bar_height: i32 = (height as i32 - 14).max(4);

        for x in 0..width as i32 {
            let fraction: f64 = x as f64 / width.max(1) as f64;
            let value: f64 = vmin + fraction * (vmax - vmin);
            let style: ShapeStyle = self.value_to_color(value, vmin, vmax).filled();
            area.draw(&Rectangle::new([(x, 0), (x + 1, bar_height)], style)).map_err(Error::from_draw)?;
        }

        for (value, fraction) in colorbar_ticks(vmin, vmax) {
            let x: i32 = (fraction * (width.saturating_sub(30)) as f64) as i32;
            area.draw(&Text::new(format!("{:.2}", value), (x, bar_height + 2), ("sans-serif", 11).into_font()))
                .map_err(Error::from_draw)?;
        }

        return Ok(());
    }
}

impl Default for ColorMap {
    fn default() -> ColorMap {
        return ColorMap::new();
    }
}

/// Five evenly spaced (value, fraction) tick positions.
fn colorbar_ticks(vmin: f64, vmax: f64) -> Vec<(f64, f64)> {
    let fractions: Array1<f64> = Array1::linspace(0.0, 1.0, 5);
    return fractions.iter().map(|&fraction| (vmin + fraction * (vmax - vmin), fraction)).collect();
}
