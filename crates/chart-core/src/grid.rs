// File: crates/chart-core/src/grid.rs
// Summary: Tick spacing and grid line layout.

use crate::color::Rgba;
use crate::geometry::PlotRect;
use crate::scene::{DrawCmd, Stroke};
use crate::types::Pt;

/// `steps` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Vertical lines at `xs` and horizontal lines at `ys`, restricted to the plot.
pub fn grid_lines(plot: &PlotRect, xs: &[f64], ys: &[f64], color: Rgba) -> Vec<DrawCmd> {
    let stroke = Stroke::solid(color, 1.0);
    let verticals = xs
        .iter()
        .filter(|x| x.is_finite())
        .map(|&x| DrawCmd::Line { from: Pt::new(x, plot.top), to: Pt::new(x, plot.bottom), stroke });
    let horizontals = ys
        .iter()
        .filter(|y| y.is_finite())
        .map(|&y| DrawCmd::Line { from: Pt::new(plot.left, y), to: Pt::new(plot.right, y), stroke });
    verticals.chain(horizontals).collect()
}
