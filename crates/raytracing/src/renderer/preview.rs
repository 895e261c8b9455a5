//! CPU stand-in for the GPU backend: looks straight down -Y with an
//! orthographic projection and keeps the highest box per pixel.

use tracing::debug;

use crate::{
    geometry::{Shape, Vec3, VOXEL_COORDINATE_SCALE},
    materials::Material,
    scene::Scene,
};

use super::{RenderOutput, RenderingBackend};

/// Top-down preview. The view covers the ground plane, widened to the
/// camera's aspect ratio; +X runs right and +Z runs down the image.
#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer;

// lowest shade, for boxes at the scene floor
const MIN_SHADE: f32 = 0.5;

struct View {
    origin_x: f32,
    origin_z: f32,
    pixels_per_unit: f32,
    width: u32,
    height: u32,
}

impl View {
    /// Half-open pixel span covered by `[lo, lo + size)` world units
    fn span(&self, lo: f32, origin: f32, size: f32, limit: u32) -> (u32, u32) {
        let start = ((lo - origin) * self.pixels_per_unit).floor();
        let end = ((lo + size - origin) * self.pixels_per_unit).ceil().max(start + 1.0);
        (start.clamp(0.0, limit as f32) as u32, end.clamp(0.0, limit as f32) as u32)
    }
}

impl RenderingBackend for PreviewRenderer {
    fn render(&self, scene: &Scene) -> RenderOutput {
        let width = scene.camera.raster_width as u32;
        let height = scene.camera.raster_height as u32;
        let mut output = RenderOutput::new(width, height);
        if width == 0 || height == 0 {
            return output;
        }

        let ground = scene.ground_plane().map(|plane| plane.bounds()).unwrap_or(scene.aabb);
        let side = f32::max(ground.extent(0), ground.extent(2)).max(1.0 / VOXEL_COORDINATE_SCALE);
        let center = ground.center();
        let pixels_per_unit = height as f32 / side;
        let view = View {
            origin_x: center.x() - 0.5 * width as f32 / pixels_per_unit,
            origin_z: center.z() - 0.5 * side,
            pixels_per_unit,
            width,
            height,
        };

        let ground_color = scene
            .primitives
            .iter()
            .find(|p| matches!(p.shape, Shape::Parallelogram(_)))
            .and_then(|p| scene.materials.get(p.material as usize))
            .map(|Material::Diffuse { albedo }| *albedo)
            .unwrap_or_default();
        output.beauty.fill(ground_color);

        let floor = scene.aabb.minimum.y();
        let scene_height = scene.aabb.extent(1);
        let cell = 1.0 / VOXEL_COORDINATE_SCALE;
        let mut depth = vec![f32::NEG_INFINITY; output.beauty.len()];
        let mut drawn = 0usize;

        for batch in scene.box_batches() {
            for voxel in batch.voxels() {
                let position = batch.voxel_position(voxel);
                let top = position.y() + cell;

                let shade = if scene_height > 0.0 {
                    MIN_SHADE + (1.0 - MIN_SHADE) * (position.y() - floor) / scene_height
                } else {
                    1.0
                };
                let rgba = scene.palette[voxel.color_index];
                let color = Vec3::from([rgba.r, rgba.g, rgba.b]) / Vec3::splat(255.0) * shade;

                let (x0, x1) = view.span(position.x(), view.origin_x, cell, view.width);
                let (z0, z1) = view.span(position.z(), view.origin_z, cell, view.height);
                for row in z0..z1 {
                    for col in x0..x1 {
                        let index = (row * view.width + col) as usize;
                        if top > depth[index] {
                            depth[index] = top;
                            output.beauty[index] = color;
                        }
                    }
                }
                drawn += 1;
            }
        }

        debug!(boxes = drawn, width, height, "preview rendered");
        output
    }
}

#[cfg(test)]
mod tests {
    use vox::{Palette, Rgba8, Voxel, VoxFile, VoxelModel};

    use super::*;
    use crate::{materials::VOXEL_ALBEDO, settings::SceneSettings};

    fn scene_of(voxels: Vec<Voxel>) -> Scene {
        let mut entries = *Palette::default().entries();
        entries[1] = Rgba8::new(255, 0, 0, 255);
        entries[2] = Rgba8::new(0, 255, 0, 255);
        let file = VoxFile::with_palette(vec![VoxelModel { dims: [1, 1, 1], voxels }], Palette::from_entries(entries));

        let settings = SceneSettings {
            raster_width: 8,
            raster_height: 8,
            ..Default::default()
        };
        Scene::from_vox_files(&[file], &settings).unwrap()
    }

    #[test]
    fn single_voxel_over_ground() {
        let scene = scene_of(vec![Voxel::new(0, 0, 0, 1)]);
        let output = PreviewRenderer.render(&scene);

        assert_eq!((output.width, output.height), (8, 8));
        // the ground spans two cells centred on the voxel origin
        assert_eq!(output.pixel(6, 6), Vec3(1.0, 0.0, 0.0));
        assert_eq!(output.pixel(1, 1), Vec3::splat(VOXEL_ALBEDO));
    }

    #[test]
    fn higher_box_hides_lower_one() {
        let scene = scene_of(vec![Voxel::new(0, 0, 0, 1), Voxel::new(0, 1, 0, 2)]);
        let output = PreviewRenderer.render(&scene);

        let center = output.pixel(4, 4);
        assert_eq!(center.x(), 0.0);
        assert!(center.y() > 0.0);
    }

    #[test]
    fn saves_png() {
        let scene = scene_of(vec![Voxel::new(0, 0, 0, 1)]);
        let output = PreviewRenderer.render(&scene);

        let path = std::env::temp_dir().join(format!("raytracing-preview-{}.png", std::process::id()));
        output.save(&path).unwrap();
        let written = image::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((written.width(), written.height()), (8, 8));
    }
}
