// File: crates/chart-core/src/series.rs
// Summary: Point/Series data model and normalization of raw upstream records.
// Notes:
// - Upstream payloads carry the value under one of several field names; they are
//   folded into a single `Point { timestamp, value }` here, before any scale or
//   geometry code sees them.
// - The engine never sorts caller-owned vectors; `Series::sanitized` works on a copy.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// One observation: an instant and a finite value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Point {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp as epoch milliseconds, the unit the time scale works in.
    #[inline]
    pub fn millis(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64
    }
}

/// One named line (optionally filled) of time-ordered points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub points: Vec<Point>,
    #[serde(default)]
    pub area: bool,
    #[serde(default)]
    pub fill_to_zero: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self { name: name.into(), color: None, points, area: false, fill_to_zero: false }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_area(mut self, area: bool) -> Self {
        self.area = area;
        self
    }

    pub fn with_fill_to_zero(mut self, fill_to_zero: bool) -> Self {
        self.fill_to_zero = fill_to_zero;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy of this series with non-finite values removed and points in
    /// chronological order. Equal timestamps keep their input order.
    pub fn sanitized(&self) -> Series {
        let mut points: Vec<Point> = self.points.iter().copied().filter(|p| p.value.is_finite()).collect();
        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Series {
            name: self.name.clone(),
            color: self.color.clone(),
            points,
            area: self.area,
            fill_to_zero: self.fill_to_zero,
        }
    }
}

/// Point annotation drawn over the data layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl Marker {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value, color: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Timestamp as it arrives from the REST layer: text or an epoch number.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Epoch(f64),
    Text(String),
}

/// Upstream record shape. Exactly which value field is populated depends on the
/// producing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(default, alias = "date", alias = "time")]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub value_usdt: Option<f64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl RawPoint {
    /// Fold into a `Point`. Returns `None` when the timestamp is missing or
    /// unparseable, or when the selected value is not finite.
    pub fn normalize(&self) -> Option<Point> {
        let timestamp = match self.timestamp.as_ref()? {
            RawTimestamp::Epoch(n) => from_epoch(*n)?,
            RawTimestamp::Text(s) => parse_timestamp(s).ok()?,
        };
        let value = self.value_usdt.or(self.total_value).or(self.value).unwrap_or(0.0);
        value.is_finite().then_some(Point { timestamp, value })
    }
}

/// Normalize a batch of raw records, silently dropping malformed ones.
pub fn normalize_points(raw: &[RawPoint]) -> Vec<Point> {
    let out: Vec<Point> = raw.iter().filter_map(RawPoint::normalize).collect();
    if out.len() != raw.len() {
        log::debug!("dropped {} malformed records of {}", raw.len() - out.len(), raw.len());
    }
    out
}

/// Parse the timestamp spellings the upstream API emits.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ChartError::InvalidTimestamp(s.to_string()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(n) = s.parse::<f64>() {
        if let Some(dt) = from_epoch(n) {
            return Ok(dt);
        }
    }
    Err(ChartError::InvalidTimestamp(s.to_string()))
}

/// Epoch seconds or milliseconds (magnitudes above 1e12 are treated as ms).
pub fn from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let ms = if n.abs() > 1e12 { n } else { n * 1000.0 };
    DateTime::<Utc>::from_timestamp_millis(ms.round() as i64)
}
