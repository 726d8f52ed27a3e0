// File: crates/chart-core/src/options.rs
// Summary: Construction-time chart configuration.

use serde::{Deserialize, Serialize};

use crate::format::{DateFormat, ValueFormat};
use crate::theme::DEFAULT_PALETTE;
use crate::types::{Insets, HEIGHT, WIDTH};

/// Fixed configuration a chart is built with. Every field has a default, so
/// partial JSON documents deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    /// Hex colors assigned to series in insertion order.
    pub palette: Vec<String>,
    pub theme: String,
    pub show_grid: bool,
    pub show_tooltip: bool,
    /// Accepted for compatibility; frames are always produced synchronously.
    pub animate: bool,
    /// Draw a small circle at every data point.
    pub show_points: bool,
    pub point_radius: f64,
    pub line_width: f64,
    pub date_format: DateFormat,
    pub value_format: ValueFormat,
    /// Symmetric value domain around zero; percentage values are fractions.
    pub center_zero: bool,
    /// Shade between the first two series.
    pub shade_between: bool,
    /// Fill under every series, not only those flagged `area`.
    pub fill_area: bool,
    /// Max cursor distance, in pixels, for the tooltip to pick a point.
    pub hit_radius: f64,
    /// Extra room around the plot rectangle before data is clipped.
    pub clip_padding: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            theme: "dark".to_string(),
            show_grid: true,
            show_tooltip: true,
            animate: false,
            show_points: true,
            point_radius: 3.0,
            line_width: 2.0,
            date_format: DateFormat::default(),
            value_format: ValueFormat::default(),
            center_zero: false,
            shade_between: false,
            fill_area: false,
            hit_radius: 20.0,
            clip_padding: 4.0,
        }
    }
}

impl ChartOptions {
    /// Percentage values are stored as fractions in center-zero mode.
    pub fn fractional_values(&self) -> bool {
        self.center_zero
    }
}
