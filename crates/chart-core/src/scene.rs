// File: crates/chart-core/src/scene.rs
// Summary: Display list handed to surfaces, and the per-layer cache it is composed from.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{PathData, PlotRect};
use crate::types::Pt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    /// `[on, off]` dash lengths in pixels.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub const fn solid(color: Rgba, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub const fn dashed(color: Rgba, width: f64, on: f64, off: f64) -> Self {
        Self { color, width, dash: Some([on, off]) }
    }
}

/// Horizontal text anchoring relative to `at.x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    Clear(Rgba),
    Line { from: Pt, to: Pt, stroke: Stroke },
    Path { path: PathData, fill: Option<Rgba>, stroke: Option<Stroke> },
    Circle { center: Pt, radius: f64, fill: Rgba, stroke: Option<Stroke> },
    Rect { rect: PlotRect, fill: Option<Rgba>, stroke: Option<Stroke> },
    /// `at.y` is the text baseline.
    Text { at: Pt, text: String, size: f64, color: Rgba, anchor: Anchor },
    PushClip(PlotRect),
    PopClip,
    /// Transparent pointer target; surfaces do not paint it.
    HitArea(PlotRect),
}

/// One frame: an ordered list of draw commands over a `width` x `height` surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    /// Stable serialized form, used to compare frames byte for byte.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathData> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Path { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Layers in paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Background,
    Grid,
    Axes,
    Data,
    Markers,
    Overlay,
}

/// Cached commands per layer, so a partial update only rebuilds its own layer.
#[derive(Clone, Debug, Default)]
pub struct Layers {
    background: Vec<DrawCmd>,
    grid: Vec<DrawCmd>,
    axes: Vec<DrawCmd>,
    data: Vec<DrawCmd>,
    markers: Vec<DrawCmd>,
    overlay: Vec<DrawCmd>,
}

impl Layers {
    pub fn get(&self, layer: Layer) -> &[DrawCmd] {
        match layer {
            Layer::Background => &self.background,
            Layer::Grid => &self.grid,
            Layer::Axes => &self.axes,
            Layer::Data => &self.data,
            Layer::Markers => &self.markers,
            Layer::Overlay => &self.overlay,
        }
    }

    pub fn set(&mut self, layer: Layer, cmds: Vec<DrawCmd>) {
        let slot = match layer {
            Layer::Background => &mut self.background,
            Layer::Grid => &mut self.grid,
            Layer::Axes => &mut self.axes,
            Layer::Data => &mut self.data,
            Layer::Markers => &mut self.markers,
            Layer::Overlay => &mut self.overlay,
        };
        *slot = cmds;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn compose(&self, width: u32, height: u32) -> Scene {
        let order = [Layer::Background, Layer::Grid, Layer::Axes, Layer::Data, Layer::Markers, Layer::Overlay];
        let commands = order.iter().flat_map(|l| self.get(*l).iter().cloned()).collect();
        Scene { width, height, commands }
    }
}
