// File: crates/chart-core/tests/chart_lifecycle.rs
// Purpose: Chart operations end to end against an in-memory surface.

use chart_core::axis::Axis;
use chart_core::render::{EMPTY_MESSAGE, LOADING_MESSAGE, MARKER_RADIUS};
use chart_core::theme::DEFAULT_PALETTE;
use chart_core::{
    Chart, ChartOptions, ChartState, DateFormat, DrawCmd, Marker, Point, RecordingSurface, Rgba, Series,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn daily(name: &str, values: &[f64]) -> Series {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point::new(t0() + Duration::days(i as i64), *v))
        .collect();
    Series::new(name, points)
}

fn chart_with(options: ChartOptions) -> Chart<RecordingSurface> {
    Chart::new(RecordingSurface::new(), options).unwrap()
}

fn chart() -> Chart<RecordingSurface> {
    chart_with(ChartOptions::default())
}

fn sample() -> Vec<Series> {
    vec![
        daily("Portfolio", &[100.0, 104.0, 101.0, 108.0, 112.0]),
        daily("Benchmark", &[100.0, 101.0, 103.0, 102.0, 105.0]),
    ]
}

fn marker_circles(chart: &Chart<RecordingSurface>) -> usize {
    chart
        .scene()
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCmd::Circle { radius, stroke: Some(_), .. } if *radius == MARKER_RADIUS))
        .count()
}

#[test]
fn new_chart_shows_empty_state() {
    let chart = chart();
    assert_eq!(chart.state(), ChartState::Empty);
    assert!(chart.scales().is_none());
    assert!(chart.scene().texts().any(|t| t == EMPTY_MESSAGE));
    assert_eq!(chart.surface().size(), (960, 400));
    assert_eq!(chart.surface().frames(), 1);
}

#[test]
fn set_data_draws_every_valid_point() {
    let mut chart = chart();
    let mut data = sample();
    data[1].points[2].value = f64::NAN;
    chart.set_data(&data).unwrap();

    assert_eq!(chart.state(), ChartState::Ready);
    assert_eq!(chart.hit_points().len(), 9);
    assert!(chart.hit_points().iter().all(|h| h.value.is_finite()));
    // two line strokes at least
    assert!(chart.scene().paths().count() >= 2);
    assert!(!chart.scene().texts().any(|t| t == EMPTY_MESSAGE));
    assert_eq!(chart.surface().last_scene(), Some(chart.scene()));
}

#[test]
fn no_valid_points_means_empty_state() {
    let mut chart = chart();
    chart.set_data(&[]).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);

    chart.set_data(&[daily("x", &[f64::NAN, f64::INFINITY])]).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);
    assert!(chart.scene().texts().any(|t| t == EMPTY_MESSAGE));
    assert!(chart.hit_points().is_empty());
}

#[test]
fn recovery_from_empty_leaves_no_residue() {
    let mut recovered = chart();
    recovered.set_data(&[]).unwrap();
    recovered.set_data(&sample()).unwrap();

    let mut fresh = chart();
    fresh.set_data(&sample()).unwrap();

    assert_eq!(recovered.state(), ChartState::Ready);
    assert_eq!(recovered.scene().to_json_bytes().unwrap(), fresh.scene().to_json_bytes().unwrap());
    assert_eq!(recovered.hit_points(), fresh.hit_points());
}

#[test]
fn caller_data_is_never_reordered() {
    let mut data = sample();
    data[0].points.reverse();
    let before = data.clone();

    let mut chart = chart();
    chart.set_data(&data).unwrap();

    assert_eq!(data, before);
    let kept = &chart.series()[0].points;
    assert!(kept.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn resize_twice_gives_identical_frames() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.resize(800, 300).unwrap();
    let first = chart.scene().to_json_bytes().unwrap();
    chart.resize(800, 300).unwrap();
    let second = chart.scene().to_json_bytes().unwrap();
    assert_eq!(first, second);

    // Same as a chart built at that size from the start.
    let mut direct = chart_with(ChartOptions { width: 800, height: 300, ..ChartOptions::default() });
    direct.set_data(&sample()).unwrap();
    assert_eq!(first, direct.scene().to_json_bytes().unwrap());
}

#[test]
fn resize_recomputes_pixel_ranges() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.resize(500, 250).unwrap();
    let scales = chart.scales().unwrap();
    let plot = chart.plot_rect();
    assert_eq!(scales.x.range, (plot.left, plot.right));
    assert_eq!(scales.y.range, (plot.bottom, plot.top));
    assert_eq!(plot.right, 500.0 - 24.0);
    assert_eq!(chart.surface().size(), (500, 250));
    assert_eq!(chart.scene().width, 500);
}

#[test]
fn zero_size_is_clamped() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.resize(0, 0).unwrap();
    assert_eq!(chart.surface().size(), (1, 1));
    assert_eq!(chart.state(), ChartState::Ready);
}

#[test]
fn resize_keeps_placeholder_states() {
    let mut chart = chart();
    chart.resize(300, 200).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);

    chart.show_loading_state().unwrap();
    chart.resize(640, 480).unwrap();
    assert_eq!(chart.state(), ChartState::Loading);
    assert!(chart.scene().texts().any(|t| t == LOADING_MESSAGE));
}

#[test]
fn set_markers_only_adds_the_marker_layer() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    let before = chart.scene().clone();
    let frames = chart.surface().frames();

    let markers = [
        Marker::new(t0() + Duration::days(2), 103.0),
        Marker::new(t0() + Duration::days(3), f64::NAN),
    ];
    chart.set_markers(&markers).unwrap();
    let after = chart.scene();

    assert_eq!(chart.surface().frames(), frames + 1);
    assert_eq!(marker_circles(&chart), 1);
    // clip push, one marker, clip pop
    assert_eq!(after.commands.len(), before.commands.len() + 3);
    assert!(before.paths().eq(after.paths()));
    assert!(before.texts().eq(after.texts()));
    assert_eq!(chart.hit_points().len(), 10);
}

#[test]
fn markers_wait_for_data_and_survive_clear() {
    let mut chart = chart();
    chart.set_markers(&[Marker::new(t0(), 100.0).with_color("#ff0000")]).unwrap();
    assert_eq!(chart.surface().frames(), 1);
    assert_eq!(marker_circles(&chart), 0);

    chart.set_data(&sample()).unwrap();
    assert_eq!(marker_circles(&chart), 1);
    let red = Rgba::rgb(255, 0, 0);
    assert!(chart.scene().commands.iter().any(|c| matches!(c, DrawCmd::Circle { fill, .. } if *fill == red)));

    chart.clear().unwrap();
    assert_eq!(marker_circles(&chart), 0);
    chart.set_data(&sample()).unwrap();
    assert_eq!(marker_circles(&chart), 1);
}

#[test]
fn set_period_switches_time_labels() {
    let hourly: Vec<Point> = (0..=24).map(|h| Point::new(t0() + Duration::hours(h), 100.0 + h as f64)).collect();
    let mut chart = chart();
    chart.set_data(&[Series::new("Intraday", hourly)]).unwrap();

    chart.set_period(1.0).unwrap();
    assert_eq!(chart.date_format(), DateFormat::Adaptive { period_days: 1.0 });
    let axis = Axis::time(&chart.scales().unwrap().x, &chart.date_format());
    assert!(!axis.ticks.is_empty());
    for tick in &axis.ticks {
        assert_eq!(tick.label.len(), 5, "{}", tick.label);
        assert_eq!(tick.label.as_bytes()[2], b':');
        assert!(chart.scene().texts().any(|t| t == tick.label));
    }

    chart.set_period(365.0).unwrap();
    let axis = Axis::time(&chart.scales().unwrap().x, &chart.date_format());
    assert!(axis.ticks.iter().all(|t| t.label == "Jan 2026"));
    assert!(chart.scene().texts().any(|t| t == "Jan 2026"));
}

#[test]
fn loading_state_keeps_data() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.show_loading_state().unwrap();

    assert_eq!(chart.state(), ChartState::Loading);
    assert!(chart.scene().texts().any(|t| t == LOADING_MESSAGE));
    assert!(chart.scales().is_none());
    assert!(chart.hit_points().is_empty());
    assert_eq!(chart.series().len(), 2);

    chart.pointer_move(500.0, 200.0).unwrap();
    assert!(chart.tooltip().is_none());

    chart.set_data(&sample()).unwrap();
    assert_eq!(chart.state(), ChartState::Ready);
}

#[test]
fn clear_drops_series() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.clear().unwrap();
    assert_eq!(chart.state(), ChartState::Empty);
    assert!(chart.series().is_empty());
    assert!(chart.hit_points().is_empty());
    assert!(chart.scene().texts().any(|t| t == EMPTY_MESSAGE));

    let frames = chart.surface().frames();
    let surface = chart.into_surface();
    assert_eq!(surface.frames(), frames);
    assert!(surface.last_scene().is_some_and(|s| s.texts().any(|t| t == EMPTY_MESSAGE)));
}

#[test]
fn hovering_near_a_point_shows_its_tooltip() {
    let mut chart = chart();
    chart.set_data(&[daily("Fund", &[100.0, 110.0, 105.0])]).unwrap();
    let plot = chart.plot_rect();
    let target = chart.hit_points()[1].clone();
    assert_eq!(target.value, 110.0);

    chart.pointer_move(target.local.x + plot.left + 3.0, target.local.y + plot.top - 2.0).unwrap();
    let tip = chart.tooltip().unwrap();
    assert_eq!(tip.point, target);
    assert_eq!(tip.lines, vec!["Fund".to_string(), "$110.00".to_string(), "Jan 2, 2026 00:00".to_string()]);
    assert!(chart.scene().texts().any(|t| t == "$110.00"));
    assert!(tip.rect.left >= 0.0 && tip.rect.right <= 960.0);

    chart.pointer_leave().unwrap();
    assert!(chart.tooltip().is_none());
    assert!(matches!(chart.scene().commands.last(), Some(DrawCmd::HitArea(_))));
}

#[test]
fn hovering_far_from_points_shows_nothing() {
    let mut chart = chart();
    chart.set_data(&[daily("Fund", &[100.0, 110.0, 105.0])]).unwrap();
    let frames = chart.surface().frames();
    chart.pointer_move(1.0, 1.0).unwrap();
    assert!(chart.tooltip().is_none());
    // unchanged overlay, no new frame
    assert_eq!(chart.surface().frames(), frames);
}

#[test]
fn tooltip_can_be_disabled() {
    let mut chart = chart_with(ChartOptions { show_tooltip: false, ..ChartOptions::default() });
    chart.set_data(&[daily("Fund", &[100.0, 110.0, 105.0])]).unwrap();
    let plot = chart.plot_rect();
    let target = chart.hit_points()[0].clone();
    chart.pointer_move(target.local.x + plot.left, target.local.y + plot.top).unwrap();
    assert!(chart.tooltip().is_none());
}

#[test]
fn tooltip_flips_left_at_the_right_edge() {
    let mut chart = chart();
    chart.set_data(&[daily("Fund", &[100.0, 110.0, 105.0])]).unwrap();
    let plot = chart.plot_rect();
    let last = chart.hit_points()[2].clone();
    let cursor_x = last.local.x + plot.left;
    chart.pointer_move(cursor_x, last.local.y + plot.top).unwrap();
    let tip = chart.tooltip().unwrap();
    assert!(tip.rect.right < cursor_x);
}

#[test]
fn hidden_series_are_not_drawn_or_hit() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    assert!(chart.scene().texts().any(|t| t == "Benchmark"));

    chart.set_series_visible("Benchmark", false).unwrap();
    assert_eq!(chart.hit_points().len(), 5);
    assert!(chart.hit_points().iter().all(|h| h.series == "Portfolio"));
    assert!(!chart.scene().texts().any(|t| t == "Benchmark"));

    chart.set_series_visible("Benchmark", true).unwrap();
    assert_eq!(chart.hit_points().len(), 10);
}

#[test]
fn shading_between_two_series_uses_sign_colors() {
    let options = ChartOptions { center_zero: true, shade_between: true, ..ChartOptions::default() };
    let mut chart = chart_with(options);
    let a = daily("A", &[0.02, 0.03, -0.01, -0.02]);
    let b = daily("B", &[0.0, 0.0, 0.0, 0.0]);
    chart.set_data(&[a, b]).unwrap();

    let theme = *chart.theme();
    let fills: Vec<Rgba> = chart
        .scene()
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Path { fill: Some(f), .. } => Some(*f),
            _ => None,
        })
        .collect();
    assert!(fills.contains(&theme.positive_shade));
    assert!(fills.contains(&theme.negative_shade));
}

#[test]
fn data_is_clipped_to_the_padded_plot() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    let plot = chart.plot_rect();
    let clip = chart.scene().commands.iter().find_map(|c| match c {
        DrawCmd::PushClip(r) => Some(*r),
        _ => None,
    });
    assert_eq!(clip, Some(plot.padded(4.0)));
}

#[test]
fn bad_series_color_falls_back_to_palette() {
    let mut chart = chart();
    chart.set_data(&[daily("x", &[1.0, 2.0]).with_color("not-a-color")]).unwrap();
    let first = Rgba::from_hex(DEFAULT_PALETTE[0]).unwrap();
    assert!(chart.hit_points().iter().all(|h| h.color == first));

    chart.set_data(&[daily("x", &[1.0, 2.0]).with_color("#123456")]).unwrap();
    assert_eq!(chart.hit_points()[0].color, Rgba::rgb(0x12, 0x34, 0x56));
}

#[test]
fn hidden_names_do_not_survive_a_reset() {
    let mut chart = chart();
    chart.set_data(&[daily("A", &[1.0, 2.0, 3.0])]).unwrap();
    chart.set_series_visible("A", false).unwrap();
    chart.set_data(&[]).unwrap();
    chart.clear().unwrap();
    chart.set_data(&[daily("A", &[1.0, 2.0, 3.0])]).unwrap();

    assert_eq!(chart.state(), ChartState::Ready);
    assert_eq!(chart.hit_points().len(), 3);

    // Replacing data without the hidden name forgets it too.
    chart.set_series_visible("A", false).unwrap();
    chart.set_data(&[daily("B", &[1.0, 2.0])]).unwrap();
    chart.set_data(&[daily("A", &[1.0, 2.0, 3.0])]).unwrap();
    assert_eq!(chart.state(), ChartState::Ready);
    assert_eq!(chart.hit_points().len(), 3);
}

#[test]
fn hidden_names_survive_a_refresh_with_the_same_series() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.set_series_visible("Benchmark", false).unwrap();
    chart.set_data(&sample()).unwrap();
    assert!(chart.hit_points().iter().all(|h| h.series == "Portfolio"));
}

#[test]
fn hiding_everything_then_unhiding_restores_the_plot() {
    let mut chart = chart();
    chart.set_data(&[daily("A", &[1.0, 2.0, 3.0])]).unwrap();
    chart.set_series_visible("A", false).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);
    assert!(chart.scene().texts().any(|t| t == EMPTY_MESSAGE));

    // Still held while hidden: resize and period changes keep it ready to come back.
    chart.resize(700, 300).unwrap();
    chart.set_period(7.0).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);

    chart.set_series_visible("A", true).unwrap();
    assert_eq!(chart.state(), ChartState::Ready);
    assert_eq!(chart.hit_points().len(), 3);
    assert_eq!(chart.scene().width, 700);
    assert_eq!(chart.date_format(), DateFormat::Adaptive { period_days: 7.0 });
}

#[test]
fn explicit_empty_state_is_kept_across_resize() {
    let mut chart = chart();
    chart.set_data(&sample()).unwrap();
    chart.show_empty_state().unwrap();
    chart.resize(640, 320).unwrap();
    assert_eq!(chart.state(), ChartState::Empty);
    assert_eq!(chart.series().len(), 2);
}
