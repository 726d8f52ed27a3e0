// File: crates/chart-core/src/geometry.rs
// Summary: Pixel-space path construction: lines, areas, shaded-between regions, zero guide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scale::Scales;
use crate::series::Series;
use crate::types::{Insets, Pt};

/// Plot area in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }

    /// Surface minus margins. Margins larger than the surface collapse to a
    /// zero-sized plot rather than an inverted one.
    pub fn from_insets(width: u32, height: u32, insets: &Insets) -> Self {
        let left = insets.left as f64;
        let top = insets.top as f64;
        let right = (width as f64 - insets.right as f64).max(left);
        let bottom = (height as f64 - insets.bottom as f64).max(top);
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }

    pub fn center(&self) -> Pt {
        Pt::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    pub fn contains(&self, p: Pt) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Grown by `pad` on every side.
    pub fn padded(&self, pad: f64) -> Self {
        Self::from_ltrb(self.left - pad, self.top - pad, self.right + pad, self.bottom + pad)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(Pt),
    LineTo(Pt),
    Close,
}

/// Vector path as a flat command list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub cmds: Vec<PathCmd>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Pt) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Pt) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Vertices in command order (close commands skipped).
    pub fn vertices(&self) -> impl Iterator<Item = Pt> + '_ {
        self.cmds.iter().filter_map(|c| match *c {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(p),
            PathCmd::Close => None,
        })
    }
}

/// Chronological pixel coordinates of a series, non-finite ones skipped.
pub fn project(series: &Series, scales: &Scales) -> Vec<Pt> {
    series
        .points
        .iter()
        .map(|p| {
            let (x, y) = scales.map_point(p);
            Pt::new(x, y)
        })
        .filter(Pt::is_finite)
        .collect()
}

/// Polyline through `pts`. Fewer than two points draw nothing.
pub fn line_path(pts: &[Pt]) -> Option<PathData> {
    let (first, rest) = pts.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = PathData::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    Some(path)
}

/// Closed polygon between `pts` and the horizontal line `baseline_y`.
pub fn area_path(pts: &[Pt], baseline_y: f64) -> Option<PathData> {
    let (first, last) = (pts.first()?, pts.last()?);
    if pts.len() < 2 {
        return None;
    }
    let mut path = PathData::new();
    path.move_to(Pt::new(first.x, baseline_y));
    for p in pts {
        path.line_to(*p);
    }
    path.line_to(Pt::new(last.x, baseline_y)).close();
    Some(path)
}

/// Baseline for area fills: the zero row when requested and visible, else the plot bottom.
pub fn area_baseline(scales: &Scales, plot: &PlotRect, fill_to_zero: bool) -> f64 {
    match scales.zero_y() {
        Some(y) if fill_to_zero => y,
        _ => plot.bottom,
    }
}

/// Sign of `a - b` over one shaded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn of(diff: f64) -> Self {
        if diff >= 0.0 { Sign::Positive } else { Sign::Negative }
    }
}

/// One sign-consistent filled band between two series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadedRegion {
    pub sign: Sign,
    /// Coordinates of the first series, left to right.
    pub upper: Vec<Pt>,
    /// Coordinates of the second series, left to right.
    pub lower: Vec<Pt>,
}

impl ShadedRegion {
    /// Upper band forward, lower band backward, closed.
    pub fn polygon(&self) -> PathData {
        let mut path = PathData::new();
        let mut forward = self.upper.iter();
        if let Some(first) = forward.next() {
            path.move_to(*first);
        }
        for p in forward.chain(self.lower.iter().rev()) {
            path.line_to(*p);
        }
        path.close();
        path
    }
}

/// Shaded regions between `a` and `b` over their shared timestamps, split
/// wherever the sign of `a - b` flips. Runs with fewer than two points are dropped.
pub fn shaded_regions(a: &Series, b: &Series, scales: &Scales) -> Vec<ShadedRegion> {
    let by_time = |s: &Series| -> BTreeMap<i64, f64> {
        s.points
            .iter()
            .filter(|p| p.value.is_finite())
            .map(|p| (p.timestamp.timestamp_millis(), p.value))
            .collect()
    };
    let a_map = by_time(a);
    let b_map = by_time(b);

    let mut regions = Vec::new();
    let mut current: Option<ShadedRegion> = None;
    fn flush(region: Option<ShadedRegion>, out: &mut Vec<ShadedRegion>) {
        if let Some(r) = region {
            if r.upper.len() >= 2 && r.lower.len() >= 2 {
                out.push(r);
            }
        }
    }

    for (t, va) in &a_map {
        let Some(vb) = b_map.get(t) else { continue };
        let x = scales.x.map(*t as f64);
        let upper = Pt::new(x, scales.y.map(*va));
        let lower = Pt::new(x, scales.y.map(*vb));
        if !upper.is_finite() || !lower.is_finite() {
            continue;
        }
        let sign = Sign::of(va - vb);
        if let Some(run) = current.as_mut().filter(|r| r.sign == sign) {
            run.upper.push(upper);
            run.lower.push(lower);
            continue;
        }
        flush(current.take(), &mut regions);
        current = Some(ShadedRegion { sign, upper: vec![upper], lower: vec![lower] });
    }
    flush(current.take(), &mut regions);
    regions
}

/// Endpoints of the horizontal zero guide, when 0 is inside the value domain.
pub fn zero_line(scales: &Scales, plot: &PlotRect) -> Option<(Pt, Pt)> {
    let y = scales.zero_y()?;
    Some((Pt::new(plot.left, y), Pt::new(plot.right, y)))
}
