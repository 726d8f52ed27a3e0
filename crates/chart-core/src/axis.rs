// File: crates/chart-core/src/axis.rs
// Summary: Axis model: tick positions with formatted labels.

use serde::{Deserialize, Serialize};

use crate::format::{DateFormat, ValueFormat};
use crate::scale::{LinearScale, TIME_TICKS, VALUE_TICKS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Time,
    Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Domain value (epoch ms on the time axis).
    pub value: f64,
    /// Pixel position along the axis.
    pub pixel: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub kind: AxisKind,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn time(scale: &LinearScale, format: &DateFormat) -> Self {
        let ticks = scale
            .ticks(TIME_TICKS)
            .into_iter()
            .map(|value| Tick { value, pixel: scale.map(value), label: format.format_millis(value) })
            .collect();
        Self { kind: AxisKind::Time, ticks }
    }

    pub fn value(scale: &LinearScale, format: &ValueFormat, fractional: bool) -> Self {
        let ticks = scale
            .ticks(VALUE_TICKS)
            .into_iter()
            .map(|value| Tick { value, pixel: scale.map(value), label: format.tick(value, fractional) })
            .collect();
        Self { kind: AxisKind::Value, ticks }
    }

    pub fn pixels(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.pixel).collect()
    }
}
