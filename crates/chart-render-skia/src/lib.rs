// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia CPU raster `Surface` for chart-core, with PNG and RGBA8 export.

use std::path::Path;

use anyhow::{Context, Result};
use chart_core::{ChartError, Scene, Surface};
use skia_safe as skia;

pub mod paint;
pub mod text;

pub use text::TextShaper;

/// Raster surface. Each `present` repaints the whole frame and keeps the
/// resulting image until the next one.
pub struct SkiaSurface {
    width: u32,
    height: u32,
    text: Option<TextShaper>,
    image: Option<skia::Image>,
    rgba: Vec<u8>,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, text: Some(TextShaper::new()), image: None, rgba: Vec::new() }
    }

    /// Surface that skips text, for pixel-exact output across platforms.
    pub fn without_text(width: u32, height: u32) -> Self {
        Self { text: None, ..Self::new(width, height) }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Last frame as tightly packed RGBA8 rows: `(pixels, width, height, stride)`.
    pub fn rgba8(&self) -> Option<(&[u8], u32, u32, usize)> {
        let image = self.image.as_ref()?;
        let (w, h) = (image.width() as u32, image.height() as u32);
        Some((&self.rgba, w, h, w as usize * 4))
    }

    /// Last frame encoded as PNG.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let image = self.image.as_ref().context("no frame has been presented")?;
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write the last frame to `path` as PNG, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn rasterize(&mut self, scene: &Scene) -> std::result::Result<(), String> {
        let (w, h) = (self.width.max(1) as i32, self.height.max(1) as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| format!("failed to create {w}x{h} raster surface"))?;
        paint::paint_scene(surface.canvas(), scene, self.text.as_ref());

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut rgba = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut rgba, row_bytes, (0, 0)) {
            return Err("reading back raster pixels failed".to_string());
        }
        self.rgba = rgba;
        self.image = Some(surface.image_snapshot());
        Ok(())
    }
}

impl Surface for SkiaSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn present(&mut self, scene: &Scene) -> chart_core::Result<()> {
        if (scene.width, scene.height) != (self.width, self.height) {
            log::warn!(
                "scene {}x{} presented on {}x{} surface",
                scene.width, scene.height, self.width, self.height
            );
        }
        log::trace!("rasterizing {} commands", scene.commands.len());
        self.rasterize(scene).map_err(ChartError::Surface)
    }
}
