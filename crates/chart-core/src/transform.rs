// File: crates/chart-core/src/transform.rs
// Summary: Cumulative trajectories derived from per-step percentage changes.
//
// Two different accumulations exist and give different answers for any
// non-trivial input: compounding (returns over time) and plain summation
// (cumulative spread between two sources). Call sites pick one explicitly.

use chrono::Duration;

use crate::scale::DAY_MS;
use crate::series::{Point, Series};

/// Lower bound for a single step multiplier `1 + d/100`.
pub const MIN_STEP_FACTOR: f64 = 0.0001;

/// Compound per-step percent changes into a running percent return.
///
/// For deltas `d_i` the output at step `i` is `(Π(1 + d_k/100) - 1) * 100`.
/// Multipliers that are non-finite or `<= 0` are floored at [`MIN_STEP_FACTOR`].
/// No baseline point is added.
pub fn compound_percent_changes(steps: &[Point]) -> Vec<Point> {
    let mut factor = 1.0f64;
    chronological(steps)
        .into_iter()
        .map(|p| {
            let mut step = 1.0 + p.value / 100.0;
            if !step.is_finite() || step <= 0.0 {
                step = MIN_STEP_FACTOR;
            }
            factor *= step;
            Point::new(p.timestamp, (factor - 1.0) * 100.0)
        })
        .collect()
}

/// Sum per-step percent changes into a running fractional spread.
///
/// The output is a fraction (`0.10` for ten percent), preceded by a synthetic
/// zero point one step before the first input. The step is the gap between the
/// first two inputs, or one day when there is only one; the baseline is omitted
/// when that instant is out of range. Non-finite deltas add nothing.
pub fn accumulate_spread(steps: &[Point]) -> Vec<Point> {
    let steps = chronological(steps);
    let Some(first) = steps.first() else { return Vec::new() };

    let gap = steps
        .get(1)
        .map(|second| second.timestamp - first.timestamp)
        .filter(|gap| *gap > Duration::zero())
        .unwrap_or_else(|| Duration::milliseconds(DAY_MS as i64));

    let mut out = Vec::with_capacity(steps.len() + 1);
    match first.timestamp.checked_sub_signed(gap) {
        Some(t) => out.push(Point::new(t, 0.0)),
        None => log::debug!("spread baseline before {} is out of range; omitted", first.timestamp),
    }
    let mut sum = 0.0f64;
    for p in &steps {
        if p.value.is_finite() {
            sum += p.value / 100.0;
        }
        out.push(Point::new(p.timestamp, sum));
    }
    out
}

/// Which accumulation a view wants. Kept as an explicit caller choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cumulative {
    /// [`compound_percent_changes`]: percent output, no baseline.
    Compounding,
    /// [`accumulate_spread`]: fractional output, leading zero baseline.
    Additive,
}

impl Cumulative {
    pub fn apply(self, steps: &[Point]) -> Vec<Point> {
        match self {
            Cumulative::Compounding => compound_percent_changes(steps),
            Cumulative::Additive => accumulate_spread(steps),
        }
    }

    /// Same series with its step changes replaced by the trajectory.
    pub fn apply_to_series(self, series: &Series) -> Series {
        Series { points: self.apply(&series.points), ..series.clone() }
    }
}

fn chronological(steps: &[Point]) -> Vec<Point> {
    let mut sorted = steps.to_vec();
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    sorted
}
