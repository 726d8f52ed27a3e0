// File: crates/chart-core/src/interaction.rs
// Summary: Nearest-point hit-testing and tooltip placement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::{clamp, PlotRect};
use crate::types::Pt;

pub const TOOLTIP_FONT_SIZE: f64 = 12.0;
/// Gap between cursor and tooltip box.
pub const TOOLTIP_OFFSET: f64 = 12.0;
const TOOLTIP_PADDING: f64 = 8.0;
const TOOLTIP_LINE_HEIGHT: f64 = TOOLTIP_FONT_SIZE + 6.0;
/// Average glyph advance used to size boxes without a font backend.
pub const CHAR_WIDTH: f64 = TOOLTIP_FONT_SIZE * 0.6;

/// A rendered data point, in plot-local pixels, with the data it stands for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitPoint {
    pub local: Pt,
    pub series: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub color: Rgba,
}

/// Closest point to `cursor` (plot-local) within `threshold` pixels.
pub fn nearest_point(points: &[HitPoint], cursor: Pt, threshold: f64) -> Option<&HitPoint> {
    if !cursor.is_finite() {
        return None;
    }
    points
        .iter()
        .map(|p| (p, p.local.distance(cursor)))
        .filter(|(_, d)| d.is_finite() && *d <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

/// Visible tooltip: the picked point, where it sits on the surface, and the box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub point: HitPoint,
    /// The picked point in surface pixels.
    pub anchor: Pt,
    pub rect: PlotRect,
    pub lines: Vec<String>,
}

/// Estimated box size for `lines`.
pub fn tooltip_size(lines: &[String]) -> (f64, f64) {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
    let w = longest * CHAR_WIDTH + TOOLTIP_PADDING * 2.0;
    let h = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING * 2.0 - 6.0;
    (w, h)
}

/// Box of `size` next to `cursor`, flipped to the other side of the cursor
/// on any axis where it would overflow `bounds`, then clamped inside.
pub fn place_tooltip(cursor: Pt, size: (f64, f64), bounds: (f64, f64)) -> PlotRect {
    let (w, h) = size;
    let (bw, bh) = bounds;
    let mut x = cursor.x + TOOLTIP_OFFSET;
    if x + w > bw {
        x = cursor.x - TOOLTIP_OFFSET - w;
    }
    let mut y = cursor.y + TOOLTIP_OFFSET;
    if y + h > bh {
        y = cursor.y - TOOLTIP_OFFSET - h;
    }
    let x = clamp(x, 0.0, (bw - w).max(0.0));
    let y = clamp(y, 0.0, (bh - h).max(0.0));
    PlotRect::from_ltwh(x, y, w, h)
}

/// Baseline of the `i`-th text line inside a tooltip box.
pub fn tooltip_line_baseline(rect: &PlotRect, i: usize) -> Pt {
    Pt::new(
        rect.left + TOOLTIP_PADDING,
        rect.top + TOOLTIP_PADDING + TOOLTIP_FONT_SIZE * 0.85 + i as f64 * TOOLTIP_LINE_HEIGHT,
    )
}
