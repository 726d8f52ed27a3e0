// File: crates/chart-core/src/surface.rs
// Summary: Drawing surface abstraction owned by a chart, plus an in-memory recorder.

use crate::error::Result;
use crate::scene::Scene;

/// Destination of rendered frames. A chart holds exactly one, obtained at construction.
pub trait Surface {
    /// Declare the coordinate space for subsequent frames.
    fn resize(&mut self, width: u32, height: u32);
    /// Consume a complete frame.
    fn present(&mut self, scene: &Scene) -> Result<()>;
}

/// Surface that keeps the last presented scene in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    last: Option<Scene>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last.as_ref()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        self.last = Some(scene.clone());
        self.frames += 1;
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        (**self).present(scene)
    }
}
