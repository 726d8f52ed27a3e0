// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and value (Y) scales: domain derivation, linear mapping, ticks.

use crate::geometry::PlotRect;
use crate::grid::linspace;
use crate::series::{Point, Series};

/// One day in milliseconds; width of the synthetic time domain for a single instant.
pub const DAY_MS: f64 = 86_400_000.0;
/// Tick count on the value axis.
pub const VALUE_TICKS: usize = 5;
/// Tick count on the time axis.
pub const TIME_TICKS: usize = 6;

/// Floor for the largest absolute value in center-zero mode.
pub const CENTER_ZERO_MIN_ABS: f64 = 0.005;
/// Minimum symmetric padding in center-zero mode.
pub const CENTER_ZERO_MIN_PAD: f64 = 0.0025;
/// Minimum padding for the default value domain.
pub const DEFAULT_MIN_PAD: f64 = 0.001;

/// Linear map from a data domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 || !span.is_finite() {
            return (d0 + d1) * 0.5;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    /// `n` evenly spaced domain values, both ends included.
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        linspace(self.domain.0, self.domain.1, n)
    }

    pub fn contains(&self, v: f64) -> bool {
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);
        v >= lo && v <= hi
    }
}

/// How the value domain is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueDomainMode {
    /// Padded min/max, lower bound clamped at zero for non-negative data.
    Default,
    /// Symmetric around zero, for cumulative percentage trajectories.
    CenterZero,
}

/// `[min, max]` of the instants (epoch ms); a single instant widens to one day.
pub fn time_domain<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<(f64, f64)> {
    let (lo, hi) = min_max(points.into_iter().map(Point::millis))?;
    if lo == hi {
        return Some((lo - DAY_MS * 0.5, hi + DAY_MS * 0.5));
    }
    Some((lo, hi))
}

/// Value domain over finite `values`, per `mode`.
pub fn value_domain(values: impl IntoIterator<Item = f64>, mode: ValueDomainMode) -> Option<(f64, f64)> {
    let (min, max) = min_max(values)?;
    match mode {
        ValueDomainMode::CenterZero => {
            let max_abs = min.abs().max(max.abs()).max(CENTER_ZERO_MIN_ABS);
            let padding = (max_abs * 0.15).max(CENTER_ZERO_MIN_PAD);
            Some((-max_abs - padding, max_abs + padding))
        }
        ValueDomainMode::Default if max == min => {
            if max == 0.0 {
                return Some((0.0, 100.0));
            }
            let (a, b) = (max * 0.9, max * 1.1);
            let (lo, hi) = (a.min(b), a.max(b));
            Some((if max > 0.0 { lo.max(0.0) } else { lo }, hi))
        }
        ValueDomainMode::Default => {
            let padding = ((max - min) * 0.1).max(DEFAULT_MIN_PAD);
            let lo = min - padding;
            // Negative data keeps its padded bound so every value stays inside the domain.
            let lo = if min >= 0.0 { lo.max(0.0) } else { lo };
            Some((lo, max + padding))
        }
    }
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The pair of scales shared by rendering and hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    /// Derive both scales from every point of `series`. `None` when there is
    /// no valid point at all.
    pub fn compute<'a, I>(series: I, plot: &PlotRect, mode: ValueDomainMode) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Series>,
        I::IntoIter: Clone,
    {
        let series = series.into_iter();
        let points = || series.clone().flat_map(|s| s.points.iter());
        let x_domain = time_domain(points())?;
        let y_domain = value_domain(points().map(|p| p.value), mode)?;
        Some(Self {
            x: LinearScale::new(x_domain, (plot.left, plot.right)),
            // Inverted so larger values plot higher.
            y: LinearScale::new(y_domain, (plot.bottom, plot.top)),
        })
    }

    #[inline]
    pub fn map_point(&self, p: &Point) -> (f64, f64) {
        (self.x.map(p.millis()), self.y.map(p.value))
    }

    /// Pixel row of value 0, when 0 lies inside the value domain.
    pub fn zero_y(&self) -> Option<f64> {
        self.y.contains(0.0).then(|| self.y.map(0.0))
    }
}
