// File: crates/chart-core/src/format.rs
// Summary: Axis / tooltip label formatting for values and dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How values are rendered in labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Currency,
    Number,
    Percentage,
}

impl ValueFormat {
    /// Tick label. `fractional` marks percentage data stored as fractions
    /// (center-zero trajectories), which are scaled by 100 before printing.
    pub fn tick(&self, v: f64, fractional: bool) -> String {
        match self {
            ValueFormat::Currency if v.is_finite() && v.abs() >= 1000.0 => currency(v, 0),
            _ => self.full(v, fractional),
        }
    }

    /// Label with full tooltip precision.
    pub fn full(&self, v: f64, fractional: bool) -> String {
        if !v.is_finite() {
            return "-".to_string();
        }
        match self {
            ValueFormat::Currency => currency(v, 2),
            ValueFormat::Number => grouped(v, 2),
            ValueFormat::Percentage if fractional => signed_percent(v * 100.0),
            ValueFormat::Percentage => format!("{:.2}%", normalize_zero(v)),
        }
    }
}

/// Date label granularity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DateFormat {
    Short,
    #[default]
    Medium,
    Long,
    Full,
    /// Granularity picked from the visible period, in days.
    Adaptive { period_days: f64 },
}

impl DateFormat {
    /// chrono pattern for this mode.
    pub fn pattern(&self) -> &'static str {
        match *self {
            DateFormat::Short => "%m/%d",
            DateFormat::Medium => "%b %-d, %Y",
            DateFormat::Long => "%B %-d, %Y",
            DateFormat::Full => "%b %-d, %Y %H:%M",
            DateFormat::Adaptive { period_days } if period_days <= 1.0 => "%H:%M",
            DateFormat::Adaptive { period_days } if period_days <= 7.0 => "%b %-d %H:%M",
            DateFormat::Adaptive { period_days } if period_days <= 30.0 => "%b %-d",
            DateFormat::Adaptive { .. } => "%b %Y",
        }
    }

    pub fn format(&self, t: &DateTime<Utc>) -> String {
        t.format(self.pattern()).to_string()
    }

    /// Label for an epoch-millisecond tick; empty when out of chrono's range.
    pub fn format_millis(&self, ms: f64) -> String {
        if !ms.is_finite() {
            return String::new();
        }
        DateTime::<Utc>::from_timestamp_millis(ms.round() as i64)
            .map(|t| self.format(&t))
            .unwrap_or_default()
    }
}

fn normalize_zero(v: f64) -> f64 {
    // avoid printing "-0.00"
    if v.abs() < 0.005 { 0.0 } else { v }
}

fn signed_percent(pct: f64) -> String {
    let pct = normalize_zero(pct);
    if pct > 0.0 { format!("+{pct:.2}%") } else { format!("{pct:.2}%") }
}

fn currency(v: f64, decimals: usize) -> String {
    let body = grouped(v.abs(), decimals);
    if v < 0.0 && normalize_zero(v) != 0.0 { format!("-${body}") } else { format!("${body}") }
}

/// Fixed decimals with `,` thousands separators.
fn grouped(v: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let mut out = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    let negative = v < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
