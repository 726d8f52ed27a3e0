// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the time-series chart engine API.

pub mod axis;
pub mod chart;
pub mod color;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod options;
pub mod render;
pub mod scale;
pub mod scene;
pub mod series;
pub mod surface;
pub mod theme;
pub mod transform;
pub mod types;

pub use chart::{Chart, ChartState};
pub use color::Rgba;
pub use error::{ChartError, Result};
pub use format::{DateFormat, ValueFormat};
pub use geometry::{PathCmd, PathData, PlotRect, ShadedRegion, Sign};
pub use interaction::{HitPoint, Tooltip};
pub use options::ChartOptions;
pub use scale::{LinearScale, Scales, ValueDomainMode};
pub use scene::{Anchor, DrawCmd, Scene, Stroke};
pub use series::{Marker, Point, RawPoint, Series};
pub use surface::{RecordingSurface, Surface};
pub use theme::Theme;
pub use transform::{accumulate_spread, compound_percent_changes, Cumulative};
pub use types::{Insets, Pt};
