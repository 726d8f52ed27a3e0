// File: crates/chart-core/src/render.rs
// Summary: Layer builders for the render pipeline (grid, axes, data, markers, overlay, placeholders).

use crate::axis::Axis;
use crate::color::Rgba;
use crate::format::DateFormat;
use crate::geometry::{
    area_baseline, area_path, line_path, project, shaded_regions, zero_line, PlotRect, Sign,
};
use crate::grid::grid_lines;
use crate::interaction::{tooltip_line_baseline, HitPoint, Tooltip, CHAR_WIDTH, TOOLTIP_FONT_SIZE};
use crate::options::ChartOptions;
use crate::scale::Scales;
use crate::scene::{Anchor, DrawCmd, Stroke};
use crate::series::{Marker, Series};
use crate::theme::Theme;
use crate::types::Pt;

pub const LABEL_SIZE: f64 = 11.0;
pub const PLACEHOLDER_SIZE: f64 = 14.0;
/// Alpha of area fills relative to their series color.
pub const AREA_ALPHA: f64 = 0.15;
pub const MARKER_RADIUS: f64 = 5.0;
pub const LOADING_MESSAGE: &str = "Loading\u{2026}";
pub const EMPTY_MESSAGE: &str = "No data available";

/// Everything a layer builder reads, borrowed from the chart for one pass.
pub struct Frame<'a> {
    pub options: &'a ChartOptions,
    pub theme: &'a Theme,
    pub plot: PlotRect,
    pub date_format: DateFormat,
}

/// A visible series and its resolved color.
pub struct Styled<'a> {
    pub series: &'a Series,
    pub color: Rgba,
}

pub fn background(theme: &Theme) -> Vec<DrawCmd> {
    vec![DrawCmd::Clear(theme.background)]
}

/// Centered message over an otherwise blank surface.
pub fn placeholder(theme: &Theme, width: u32, height: u32, message: &str) -> Vec<DrawCmd> {
    vec![DrawCmd::Text {
        at: Pt::new(width as f64 * 0.5, height as f64 * 0.5 + PLACEHOLDER_SIZE * 0.35),
        text: message.to_string(),
        size: PLACEHOLDER_SIZE,
        color: theme.placeholder_text,
        anchor: Anchor::Middle,
    }]
}

pub fn grid_layer(scales: &Scales, frame: &Frame) -> Vec<DrawCmd> {
    if !frame.options.show_grid {
        return Vec::new();
    }
    let x_axis = Axis::time(&scales.x, &frame.date_format);
    let y_axis = Axis::value(&scales.y, &frame.options.value_format, frame.options.fractional_values());
    grid_lines(&frame.plot, &x_axis.pixels(), &y_axis.pixels(), frame.theme.grid)
}

/// Axis lines, tick labels and, for multi-series charts, a legend row.
pub fn axes_layer(scales: &Scales, frame: &Frame, visible: &[Styled]) -> Vec<DrawCmd> {
    let plot = frame.plot;
    let theme = frame.theme;
    let axis_stroke = Stroke::solid(theme.axis_line, 1.0);
    let mut cmds = vec![
        DrawCmd::Line { from: Pt::new(plot.left, plot.bottom), to: Pt::new(plot.right, plot.bottom), stroke: axis_stroke },
        DrawCmd::Line { from: Pt::new(plot.left, plot.top), to: Pt::new(plot.left, plot.bottom), stroke: axis_stroke },
    ];

    let x_axis = Axis::time(&scales.x, &frame.date_format);
    cmds.extend(x_axis.ticks.into_iter().map(|t| DrawCmd::Text {
        at: Pt::new(t.pixel, plot.bottom + 18.0),
        text: t.label,
        size: LABEL_SIZE,
        color: theme.axis_label,
        anchor: Anchor::Middle,
    }));

    let y_axis = Axis::value(&scales.y, &frame.options.value_format, frame.options.fractional_values());
    cmds.extend(y_axis.ticks.into_iter().map(|t| DrawCmd::Text {
        at: Pt::new(plot.left - 8.0, t.pixel + LABEL_SIZE * 0.35),
        text: t.label,
        size: LABEL_SIZE,
        color: theme.axis_label,
        anchor: Anchor::End,
    }));

    if visible.len() > 1 {
        cmds.extend(legend(frame, visible));
    }
    cmds
}

fn legend(frame: &Frame, visible: &[Styled]) -> Vec<DrawCmd> {
    let y = (frame.plot.top - 12.0).max(LABEL_SIZE);
    let mut x = frame.plot.left;
    let mut cmds = Vec::with_capacity(visible.len() * 2);
    for s in visible {
        cmds.push(DrawCmd::Rect {
            rect: PlotRect::from_ltwh(x, y - 9.0, 10.0, 10.0),
            fill: Some(s.color),
            stroke: None,
        });
        cmds.push(DrawCmd::Text {
            at: Pt::new(x + 14.0, y),
            text: s.series.name.clone(),
            size: LABEL_SIZE,
            color: frame.theme.axis_label,
            anchor: Anchor::Start,
        });
        x += 14.0 + s.series.name.chars().count() as f64 * CHAR_WIDTH + 16.0;
    }
    cmds
}

/// Clipped data layer: zero guide, shaded-between regions, area fills, line
/// strokes, point circles. Also returns the hit targets for every drawn point.
pub fn data_layer(scales: &Scales, frame: &Frame, visible: &[Styled]) -> (Vec<DrawCmd>, Vec<HitPoint>) {
    let plot = frame.plot;
    let opts = frame.options;
    let mut cmds = vec![DrawCmd::PushClip(plot.padded(opts.clip_padding))];
    let mut hits = Vec::new();

    if let Some((from, to)) = zero_line(scales, &plot) {
        cmds.push(DrawCmd::Line { from, to, stroke: Stroke::dashed(frame.theme.zero_line, 1.0, 4.0, 4.0) });
    }

    if opts.shade_between {
        if let [a, b, ..] = visible {
            for region in shaded_regions(a.series, b.series, scales) {
                let fill = match region.sign {
                    Sign::Positive => frame.theme.positive_shade,
                    Sign::Negative => frame.theme.negative_shade,
                };
                cmds.push(DrawCmd::Path { path: region.polygon(), fill: Some(fill), stroke: None });
            }
        }
    }

    let projected: Vec<Vec<Pt>> = visible.iter().map(|s| project(s.series, scales)).collect();

    for (s, pts) in visible.iter().zip(&projected) {
        if !(s.series.area || opts.fill_area) {
            continue;
        }
        let baseline = area_baseline(scales, &plot, s.series.fill_to_zero);
        if let Some(path) = area_path(pts, baseline) {
            cmds.push(DrawCmd::Path { path, fill: Some(s.color.with_alpha(AREA_ALPHA)), stroke: None });
        }
    }

    for (s, pts) in visible.iter().zip(&projected) {
        if let Some(path) = line_path(pts) {
            cmds.push(DrawCmd::Path { path, fill: None, stroke: Some(Stroke::solid(s.color, opts.line_width)) });
        }
    }

    for s in visible {
        for p in &s.series.points {
            let (x, y) = scales.map_point(p);
            let center = Pt::new(x, y);
            if !center.is_finite() {
                continue;
            }
            if opts.show_points {
                cmds.push(DrawCmd::Circle { center, radius: opts.point_radius, fill: s.color, stroke: None });
            }
            hits.push(HitPoint {
                local: Pt::new(x - plot.left, y - plot.top),
                series: s.series.name.clone(),
                timestamp: p.timestamp,
                value: p.value,
                color: s.color,
            });
        }
    }

    cmds.push(DrawCmd::PopClip);
    (cmds, hits)
}

/// Annotation markers; those that map to non-finite pixels are skipped.
pub fn markers_layer(markers: &[(Marker, Rgba)], scales: &Scales, frame: &Frame) -> Vec<DrawCmd> {
    if markers.is_empty() {
        return Vec::new();
    }
    let mut cmds = vec![DrawCmd::PushClip(frame.plot.padded(frame.options.clip_padding))];
    for (m, color) in markers {
        let center = Pt::new(scales.x.map(m.timestamp.timestamp_millis() as f64), scales.y.map(m.value));
        if !center.is_finite() {
            continue;
        }
        cmds.push(DrawCmd::Circle {
            center,
            radius: MARKER_RADIUS,
            fill: *color,
            stroke: Some(Stroke::solid(frame.theme.marker_stroke, 1.5)),
        });
    }
    cmds.push(DrawCmd::PopClip);
    cmds
}

/// Pointer target over the plot and, when visible, the tooltip.
pub fn overlay_layer(plot: &PlotRect, tooltip: Option<&Tooltip>, theme: &Theme) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::HitArea(*plot)];
    let Some(tip) = tooltip else { return cmds };
    cmds.push(DrawCmd::Circle {
        center: tip.anchor,
        radius: 5.0,
        fill: tip.point.color,
        stroke: Some(Stroke::solid(theme.marker_stroke, 2.0)),
    });
    cmds.push(DrawCmd::Rect {
        rect: tip.rect,
        fill: Some(theme.tooltip_background),
        stroke: Some(Stroke::solid(theme.tooltip_border, 1.0)),
    });
    for (i, line) in tip.lines.iter().enumerate() {
        cmds.push(DrawCmd::Text {
            at: tooltip_line_baseline(&tip.rect, i),
            text: line.clone(),
            size: TOOLTIP_FONT_SIZE,
            color: if i == 0 { tip.point.color } else { theme.tooltip_text },
            anchor: Anchor::Start,
        });
    }
    cmds
}
