use std::path::Path;

use anyhow::Context;

use crate::{geometry::Vec3, scene::Scene};

mod preview;

pub use preview::PreviewRenderer;

/// Linear color per pixel, row-major from the top-left corner
#[derive(Debug)]
pub struct RenderOutput {
    pub width: u32,
    pub height: u32,

    pub beauty: Vec<Vec3>,
}

impl RenderOutput {
    pub fn new(width: u32, height: u32) -> Self {
        RenderOutput {
            width,
            height,
            beauty: vec![Vec3::zero(); width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.beauty[(y * self.width + x) as usize]
    }

    /// Writes 8 bit RGB, clamping each channel to `[0, 1]`. The format
    /// follows the extension of `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let data: Vec<u8> = self.beauty.iter().flat_map(|v| {
            let r = (v.x() * 255.0).clamp(0.0, 255.0) as u8;
            let g = (v.y() * 255.0).clamp(0.0, 255.0) as u8;
            let b = (v.z() * 255.0).clamp(0.0, 255.0) as u8;
            [r, g, b]
        }).collect();

        let image = image::RgbImage::from_raw(self.width, self.height, data)
            .context("render output does not match its dimensions")?;
        image
            .save(path)
            .with_context(|| format!("failed to write image {}", path.display()))
    }
}

// very basic interface - pass in Scene object and get linear color values out
pub trait RenderingBackend {
    fn render(&self, scene: &Scene) -> RenderOutput;
}
