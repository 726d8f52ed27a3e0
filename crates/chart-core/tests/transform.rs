// File: crates/chart-core/tests/transform.rs
// Purpose: Compounding vs additive cumulative trajectories.

use chart_core::transform::MIN_STEP_FACTOR;
use chart_core::{accumulate_spread, compound_percent_changes, Cumulative, Point, Series};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 0, 0, 0).unwrap()
}

fn steps(deltas: &[f64]) -> Vec<Point> {
    deltas
        .iter()
        .enumerate()
        .map(|(i, d)| Point::new(t0() + Duration::days(i as i64), *d))
        .collect()
}

fn values(points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len(), "{got:?} vs {want:?}");
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 1e-9, "{got:?} vs {want:?}");
    }
}

#[test]
fn compounding_ten_up_ten_down_loses_one_percent() {
    let out = compound_percent_changes(&steps(&[10.0, -10.0]));
    assert_close(&values(&out), &[10.0, -1.0]);
    assert_eq!(out[0].timestamp, t0());
}

#[test]
fn additive_ten_up_ten_down_returns_to_zero_with_baseline() {
    let out = accumulate_spread(&steps(&[10.0, -10.0]));
    assert_eq!(out.len(), 3);
    // fractions: 0.10 is ten percent
    assert_close(&values(&out), &[0.0, 0.10, 0.0]);
    assert_eq!(out[2].value, 0.0);
    assert_eq!(out[0].timestamp, t0() - Duration::days(1));
    assert_eq!(out[1].timestamp, t0());
}

#[test]
fn the_two_accumulations_diverge() {
    let input = steps(&[5.0, 5.0, 5.0]);
    let compounded = compound_percent_changes(&input);
    let summed = accumulate_spread(&input);
    let last_compounded = compounded.last().unwrap().value;
    let last_summed = summed.last().unwrap().value * 100.0;
    assert!((last_compounded - 15.7625).abs() < 1e-9);
    assert!((last_summed - 15.0).abs() < 1e-9);
}

#[test]
fn collapsing_step_multiplier_is_floored() {
    let out = compound_percent_changes(&steps(&[-100.0, -250.0, f64::NAN]));
    let f1 = MIN_STEP_FACTOR;
    let f2 = f1 * MIN_STEP_FACTOR;
    let f3 = f2 * MIN_STEP_FACTOR;
    assert_close(&values(&out), &[(f1 - 1.0) * 100.0, (f2 - 1.0) * 100.0, (f3 - 1.0) * 100.0]);
    assert!(out.iter().all(|p| p.value.is_finite()));
}

#[test]
fn single_step_baseline_is_one_day_earlier() {
    let out = accumulate_spread(&steps(&[2.5]));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].timestamp, t0() - Duration::days(1));
    assert_close(&values(&out), &[0.0, 0.025]);
}

#[test]
fn baseline_uses_the_first_gap() {
    let input = vec![
        Point::new(t0(), 1.0),
        Point::new(t0() + Duration::hours(6), 1.0),
        Point::new(t0() + Duration::hours(30), 1.0),
    ];
    let out = accumulate_spread(&input);
    assert_eq!(out[0].timestamp, t0() - Duration::hours(6));
}

#[test]
fn unsorted_input_is_ordered_without_touching_caller_data() {
    let mut input = steps(&[10.0, -10.0]);
    input.reverse();
    let before = input.clone();
    let out = compound_percent_changes(&input);
    assert_eq!(input, before);
    assert_eq!(out[0].timestamp, t0());
    assert_close(&values(&out), &[10.0, -1.0]);
}

#[test]
fn empty_input_gives_empty_trajectories() {
    assert!(compound_percent_changes(&[]).is_empty());
    assert!(accumulate_spread(&[]).is_empty());
}

#[test]
fn cumulative_choice_maps_to_named_operations() {
    let s = Series::new("fund", steps(&[10.0, -10.0])).with_color("#ff0000");
    let c = Cumulative::Compounding.apply_to_series(&s);
    let a = Cumulative::Additive.apply_to_series(&s);
    assert_eq!(c.name, "fund");
    assert_eq!(c.color.as_deref(), Some("#ff0000"));
    assert_eq!(c.points, compound_percent_changes(&s.points));
    assert_eq!(a.points, accumulate_spread(&s.points));
}

#[test]
fn baseline_is_skipped_at_the_start_of_time() {
    let first = DateTime::<Utc>::MIN_UTC;
    let input = vec![Point::new(first, 5.0), Point::new(first + Duration::days(1), 5.0)];
    let out = accumulate_spread(&input);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].timestamp, first);
    assert_close(&values(&out), &[0.05, 0.10]);
}
