// File: crates/chart-core/src/chart.rs
// Summary: Chart handle: owns its surface, data and derived state; runs the render pipeline.

use std::collections::HashSet;

use crate::color::Rgba;
use crate::error::Result;
use crate::format::DateFormat;
use crate::geometry::PlotRect;
use crate::interaction::{nearest_point, place_tooltip, tooltip_size, HitPoint, Tooltip};
use crate::options::ChartOptions;
use crate::render::{self, Frame, Styled, EMPTY_MESSAGE, LOADING_MESSAGE};
use crate::scale::{Scales, ValueDomainMode};
use crate::scene::{Layer, Layers, Scene};
use crate::series::{Marker, Series};
use crate::surface::Surface;
use crate::theme::{self, resolve_palette, Theme};
use crate::types::Pt;

/// What the chart is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartState {
    Empty,
    Loading,
    Ready,
}

/// A time-series chart bound to one drawing surface.
pub struct Chart<S: Surface> {
    surface: S,
    options: ChartOptions,
    theme: Theme,
    palette: Vec<Rgba>,
    date_format: DateFormat,
    series: Vec<Series>,
    colors: Vec<Rgba>,
    hidden: HashSet<String>,
    markers: Vec<(Marker, Rgba)>,
    state: ChartState,
    /// Data is what should be shown, even when nothing is currently visible.
    data_active: bool,
    scales: Option<Scales>,
    hit_points: Vec<HitPoint>,
    tooltip: Option<Tooltip>,
    layers: Layers,
    scene: Scene,
}

impl<S: Surface> Chart<S> {
    /// Bind a chart to `surface` and show the empty state.
    pub fn new(mut surface: S, mut options: ChartOptions) -> Result<Self> {
        let (width, height) = checked_size(options.width, options.height);
        options.width = width;
        options.height = height;
        surface.resize(width, height);
        let theme = theme::find(&options.theme);
        let palette = resolve_palette(&options.palette);
        let date_format = options.date_format;
        let mut chart = Self {
            surface,
            options,
            theme,
            palette,
            date_format,
            series: Vec::new(),
            colors: Vec::new(),
            hidden: HashSet::new(),
            markers: Vec::new(),
            state: ChartState::Empty,
            data_active: false,
            scales: None,
            hit_points: Vec::new(),
            tooltip: None,
            layers: Layers::default(),
            scene: Scene::default(),
        };
        chart.show_empty_state()?;
        Ok(chart)
    }

    /// Replace every series and redraw. The caller's data is copied, never reordered.
    pub fn set_data(&mut self, series: &[Series]) -> Result<()> {
        self.series = series.iter().map(Series::sanitized).collect();
        let names: HashSet<&str> = self.series.iter().map(|s| s.name.as_str()).collect();
        self.hidden.retain(|name| names.contains(name.as_str()));
        self.colors = self
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| self.resolve_color(s.color.as_deref(), i))
            .collect();
        let given: usize = series.iter().map(|s| s.points.len()).sum();
        let kept: usize = self.series.iter().map(|s| s.points.len()).sum();
        log::debug!("set_data: {} series, {kept} points kept, {} dropped", self.series.len(), given - kept);
        self.data_active = true;
        self.render_data()
    }

    /// Replace annotation markers; only the marker layer is rebuilt.
    pub fn set_markers(&mut self, markers: &[Marker]) -> Result<()> {
        self.markers = markers
            .iter()
            .map(|m| (m.clone(), self.resolve_color(m.color.as_deref(), 0)))
            .collect();
        let Some(scales) = self.scales.filter(|_| self.state == ChartState::Ready) else {
            return Ok(());
        };
        let cmds = render::markers_layer(&self.markers, &scales, &self.frame());
        self.layers.set(Layer::Markers, cmds);
        self.present()
    }

    /// Switch to adaptive date labels for a `period_days` span.
    pub fn set_period(&mut self, period_days: f64) -> Result<()> {
        self.date_format = DateFormat::Adaptive { period_days };
        if self.data_active {
            self.render_data()?;
        }
        Ok(())
    }

    /// New surface dimensions; scales are recomputed for the new pixel ranges.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (width, height) = checked_size(width, height);
        self.options.width = width;
        self.options.height = height;
        self.surface.resize(width, height);
        if self.data_active {
            return self.render_data();
        }
        match self.state {
            ChartState::Loading => self.render_placeholder(ChartState::Loading, LOADING_MESSAGE),
            _ => self.render_placeholder(ChartState::Empty, EMPTY_MESSAGE),
        }
    }

    pub fn show_loading_state(&mut self) -> Result<()> {
        self.data_active = false;
        self.render_placeholder(ChartState::Loading, LOADING_MESSAGE)
    }

    pub fn show_empty_state(&mut self) -> Result<()> {
        self.data_active = false;
        self.render_placeholder(ChartState::Empty, EMPTY_MESSAGE)
    }

    /// Drop all series and show the empty state. Markers are kept.
    pub fn clear(&mut self) -> Result<()> {
        self.series.clear();
        self.colors.clear();
        self.hidden.clear();
        self.show_empty_state()
    }

    /// Hide or show a series by name without replacing data.
    pub fn set_series_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        let changed = if visible { self.hidden.remove(name) } else { self.hidden.insert(name.to_string()) };
        if changed && self.data_active {
            self.render_data()?;
        }
        Ok(())
    }

    /// Track the pointer at surface coordinates `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<()> {
        let tooltip = self.resolve_tooltip(Pt::new(x, y));
        self.update_tooltip(tooltip)
    }

    pub fn pointer_leave(&mut self) -> Result<()> {
        self.update_tooltip(None)
    }

    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn state(&self) -> ChartState { self.state }
    pub fn date_format(&self) -> DateFormat { self.date_format }
    pub fn series(&self) -> &[Series] { &self.series }
    pub fn scales(&self) -> Option<&Scales> { self.scales.as_ref() }
    pub fn hit_points(&self) -> &[HitPoint] { &self.hit_points }
    pub fn tooltip(&self) -> Option<&Tooltip> { self.tooltip.as_ref() }
    /// Last composed frame.
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn surface(&self) -> &S { &self.surface }

    pub fn plot_rect(&self) -> PlotRect {
        PlotRect::from_insets(self.options.width, self.options.height, &self.options.insets)
    }

    /// Give the surface back, discarding the chart.
    pub fn into_surface(self) -> S {
        self.surface
    }

    // ---- pipeline ----------------------------------------------------------

    fn frame(&self) -> Frame<'_> {
        Frame { options: &self.options, theme: &self.theme, plot: self.plot_rect(), date_format: self.date_format }
    }

    fn visible(&self) -> Vec<Styled<'_>> {
        self.series
            .iter()
            .zip(&self.colors)
            .filter(|(s, _)| !self.hidden.contains(&s.name))
            .map(|(series, color)| Styled { series, color: *color })
            .collect()
    }

    fn value_mode(&self) -> ValueDomainMode {
        if self.options.center_zero { ValueDomainMode::CenterZero } else { ValueDomainMode::Default }
    }

    /// Full recompute: scales, then every layer. Falls back to the empty state
    /// when no visible series has a valid point.
    fn render_data(&mut self) -> Result<()> {
        let built = {
            let frame = self.frame();
            let visible = self.visible();
            Scales::compute(visible.iter().map(|s| s.series), &frame.plot, self.value_mode()).map(|scales| {
                let grid = render::grid_layer(&scales, &frame);
                let axes = render::axes_layer(&scales, &frame, &visible);
                let (data, hits) = render::data_layer(&scales, &frame, &visible);
                let markers = render::markers_layer(&self.markers, &scales, &frame);
                (scales, grid, axes, data, hits, markers)
            })
        };
        let Some((scales, grid, axes, data, hits, markers)) = built else {
            log::debug!("no visible valid points; showing empty state");
            return self.render_placeholder(ChartState::Empty, EMPTY_MESSAGE);
        };
        log::trace!("render: x {:?} y {:?}, {} hit points", scales.x.domain, scales.y.domain, hits.len());

        let plot = self.plot_rect();
        self.state = ChartState::Ready;
        self.scales = Some(scales);
        self.hit_points = hits;
        self.tooltip = None;
        self.layers.set(Layer::Background, render::background(&self.theme));
        self.layers.set(Layer::Grid, grid);
        self.layers.set(Layer::Axes, axes);
        self.layers.set(Layer::Data, data);
        self.layers.set(Layer::Markers, markers);
        self.layers.set(Layer::Overlay, render::overlay_layer(&plot, None, &self.theme));
        self.present()
    }

    fn render_placeholder(&mut self, state: ChartState, message: &str) -> Result<()> {
        self.state = state;
        self.scales = None;
        self.hit_points.clear();
        self.tooltip = None;
        self.layers.clear();
        self.layers.set(Layer::Background, render::background(&self.theme));
        self.layers.set(
            Layer::Overlay,
            render::placeholder(&self.theme, self.options.width, self.options.height, message),
        );
        self.present()
    }

    fn present(&mut self) -> Result<()> {
        self.scene = self.layers.compose(self.options.width, self.options.height);
        self.surface.present(&self.scene)
    }

    fn resolve_tooltip(&self, cursor: Pt) -> Option<Tooltip> {
        if !self.options.show_tooltip || self.state != ChartState::Ready {
            return None;
        }
        let plot = self.plot_rect();
        let local = Pt::new(cursor.x - plot.left, cursor.y - plot.top);
        let hit = nearest_point(&self.hit_points, local, self.options.hit_radius)?;
        let fractional = self.options.fractional_values();
        let lines = vec![
            hit.series.clone(),
            self.options.value_format.full(hit.value, fractional),
            DateFormat::Full.format(&hit.timestamp),
        ];
        let size = tooltip_size(&lines);
        let bounds = (self.options.width as f64, self.options.height as f64);
        Some(Tooltip {
            point: hit.clone(),
            anchor: Pt::new(hit.local.x + plot.left, hit.local.y + plot.top),
            rect: place_tooltip(cursor, size, bounds),
            lines,
        })
    }

    fn update_tooltip(&mut self, tooltip: Option<Tooltip>) -> Result<()> {
        if tooltip == self.tooltip {
            return Ok(());
        }
        self.tooltip = tooltip;
        if self.state != ChartState::Ready {
            return Ok(());
        }
        let cmds = render::overlay_layer(&self.plot_rect(), self.tooltip.as_ref(), &self.theme);
        self.layers.set(Layer::Overlay, cmds);
        self.present()
    }

    fn resolve_color(&self, color: Option<&str>, index: usize) -> Rgba {
        let fallback = self.palette[index % self.palette.len()];
        match color.map(Rgba::from_hex) {
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                log::warn!("{e}; using palette color");
                fallback
            }
            None => fallback,
        }
    }
}

fn checked_size(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        log::warn!("clamping surface size {width}x{height} to at least 1x1");
    }
    (width.max(1), height.max(1))
}
