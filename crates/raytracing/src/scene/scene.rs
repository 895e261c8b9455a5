use std::path::Path;

use anyhow::{bail, Context};
use tracing::{debug, info};
use vox::{read_vox_with, Palette, VoxFile};

use crate::{
    geometry::{BoxBatch, Parallelogram, Shape, AABB},
    materials::Material,
    settings::{PalettePolicy, SceneSettings},
};

use super::{
    camera::Camera,
    layout::GridLayout,
    primitive::{MaterialIndex, Primitive},
};

/// Voxel scene ready to hand to a backend: one box batch per model, the
/// ground plane last, and the single palette every batch indexes into.
pub struct Scene {
    pub camera: Camera,
    pub primitives: Vec<Primitive>,
    pub materials: Vec<Material>,
    pub palette: Palette,
    /// Bounds of every occupied voxel; the ground plane is not included
    pub aabb: AABB,
}

// every primitive shares one diffuse material
const VOXEL_MATERIAL: MaterialIndex = 0;

impl Scene {
    /// Lays out already decoded files on a grid, in order.
    pub fn from_vox_files(files: &[VoxFile], settings: &SceneSettings) -> anyhow::Result<Scene> {
        if files.is_empty() {
            bail!("no voxel files to build a scene from");
        }
        if !(settings.column_gap.is_finite() && settings.column_gap > 0.0) {
            bail!("column gap must be positive, got {}", settings.column_gap);
        }
        if !(settings.ground_plane_scale >= 1.0) {
            bail!(
                "ground plane scale {} would not cover the scene",
                settings.ground_plane_scale
            );
        }

        let mut layout = GridLayout::new(files.len(), settings.column_gap);
        debug!(rows = layout.num_rows(), cols = layout.num_cols(), "grid layout");

        let mut primitives = Vec::new();
        let mut aabb = AABB::empty();

        for (file_index, file) in files.iter().enumerate() {
            let anchor = layout.anchor();
            let mut file_aabb = AABB::empty();

            for model in &file.models {
                let batch = BoxBatch::new(model.clone(), anchor);
                debug!(
                    file = file_index,
                    boxes = batch.primitive_count(),
                    anchor = ?anchor,
                    "box batch"
                );

                file_aabb.include(&batch.bounds());
                primitives.push(Primitive {
                    shape: Shape::VoxelBoxes(batch),
                    material: VOXEL_MATERIAL,
                });
            }

            aabb.include(&file_aabb);
            layout.advance(&file_aabb);
        }

        let ground = Parallelogram::ground_plane(&aabb, settings.ground_plane_scale);
        primitives.push(Primitive {
            shape: Shape::Parallelogram(ground),
            material: VOXEL_MATERIAL,
        });

        let palette_source = match settings.palette_policy {
            PalettePolicy::LastFileWins => files.last(),
            PalettePolicy::FirstFileWins => files.first(),
        };
        let palette = palette_source.map(|file| file.palette).unwrap_or_default();

        Ok(Scene {
            camera: Camera::framing(&aabb, settings.raster_width, settings.raster_height),
            primitives,
            materials: vec![Material::voxel_diffuse()],
            palette,
            aabb,
        })
    }

    pub fn box_batches(&self) -> impl Iterator<Item = &BoxBatch> {
        self.primitives.iter().filter_map(|primitive| match &primitive.shape {
            Shape::VoxelBoxes(batch) => Some(batch),
            _ => None,
        })
    }

    pub fn ground_plane(&self) -> Option<&Parallelogram> {
        self.primitives.iter().find_map(|primitive| match &primitive.shape {
            Shape::Parallelogram(parallelogram) => Some(parallelogram),
            _ => None,
        })
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.iter().map(|p| p.shape.primitive_count()).sum()
    }
}

/// Reads every file and assembles them. The first file that fails to read
/// fails the whole scene.
pub fn scene_from_vox_files<P: AsRef<Path>>(paths: &[P], settings: &SceneSettings) -> anyhow::Result<Scene> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let file = read_vox_with(path, &settings.read_options)
            .with_context(|| format!("failed to read voxel model {}", path.display()))?;

        info!(
            path = %path.display(),
            models = file.models.len(),
            palette_found = file.palette_found,
            "read voxel file"
        );
        files.push(file);
    }

    let scene = Scene::from_vox_files(&files, settings)?;
    info!(
        batches = scene.box_batches().count(),
        primitives = scene.primitive_count(),
        "assembled voxel scene"
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use vox::{Rgba8, Voxel, VoxelModel};

    use super::*;
    use crate::geometry::Vec3;

    // spans exactly one world unit on every axis
    fn unit_file() -> VoxFile {
        VoxFile {
            version: 150,
            models: vec![VoxelModel {
                dims: [256, 256, 256],
                voxels: vec![Voxel::new(0, 0, 0, 1), Voxel::new(255, 255, 255, 2)],
            }],
            palette: Palette::default(),
            palette_found: false,
        }
    }

    fn anchors(scene: &Scene) -> Vec<Vec3> {
        scene.box_batches().map(|batch| batch.anchor).collect()
    }

    // the per-file advance, evaluated the same way the layout does in f32
    fn expected_row(n: usize, gap: f32) -> Vec<Vec3> {
        let mut x = 0.0f32;
        let mut row = Vec::new();
        for _ in 0..n {
            row.push(Vec3(x, 0.0, 0.0));
            x += gap * ((x + 1.0) - x);
        }
        row
    }

    #[test]
    fn anchors_for_one_to_five_files() {
        let settings = SceneSettings::default();
        for n in 1..=5 {
            let files = vec![unit_file(); n];
            let scene = Scene::from_vox_files(&files, &settings).unwrap();

            // up to five files the column counter never passes the column count
            let expected = expected_row(n, 1.1);
            assert_eq!(anchors(&scene), expected, "{n} files");

            let last = expected[n - 1];
            assert_eq!(scene.aabb.minimum, Vec3::zero());
            assert_eq!(scene.aabb.maximum, last + Vec3::splat(1.0));
        }
    }

    #[test]
    fn sixth_file_starts_a_new_row() {
        let settings = SceneSettings {
            column_gap: 1.5,
            ..Default::default()
        };
        let files = vec![unit_file(); 6];
        let scene = Scene::from_vox_files(&files, &settings).unwrap();

        assert_eq!(
            anchors(&scene),
            vec![
                Vec3(0.0, 0.0, 0.0),
                Vec3(1.5, 0.0, 0.0),
                Vec3(3.0, 0.0, 0.0),
                Vec3(4.5, 0.0, 0.0),
                Vec3(6.0, 0.0, 0.0),
                Vec3(0.0, 0.0, -1.5),
            ]
        );
        assert_eq!(scene.aabb.minimum, Vec3(0.0, 0.0, -1.5));
        assert_eq!(scene.aabb.maximum, Vec3(7.0, 1.0, 1.0));
    }

    #[test]
    fn models_of_one_file_share_an_anchor() {
        let mut file = unit_file();
        file.models.push(VoxelModel {
            dims: [1, 1, 1],
            voxels: vec![Voxel::new(0, 0, 1, 5)],
        });
        let files = vec![file, unit_file()];
        let scene = Scene::from_vox_files(&files, &SceneSettings::default()).unwrap();

        let anchors = anchors(&scene);
        assert_eq!(anchors.len(), 3);
        assert_eq!(anchors[0], anchors[1]);
        assert_eq!(anchors[2], Vec3(1.1, 0.0, 0.0));
    }

    #[test]
    fn batches_keep_voxels_unmodified() {
        let files = vec![unit_file()];
        let scene = Scene::from_vox_files(&files, &SceneSettings::default()).unwrap();

        let batch = scene.box_batches().next().unwrap();
        assert_eq!(batch.voxels(), files[0].models[0].voxels.as_slice());
        assert_eq!(batch.as_bytes(), &[0, 0, 0, 1, 255, 255, 255, 2]);
        assert_eq!(scene.primitive_count(), 3);
        assert!(scene.primitives.iter().all(|p| p.material == 0));
        assert_eq!(scene.materials, vec![Material::voxel_diffuse()]);
    }

    #[test]
    fn empty_model_is_kept_but_not_bounded() {
        let mut file = unit_file();
        file.models.insert(0, VoxelModel { dims: [4, 4, 4], voxels: Vec::new() });
        let empty = VoxFile {
            models: vec![VoxelModel { dims: [2, 2, 2], voxels: Vec::new() }],
            ..unit_file()
        };

        let scene = Scene::from_vox_files(&[file, empty, unit_file()], &SceneSettings::default()).unwrap();

        assert_eq!(scene.box_batches().count(), 4);
        assert_eq!(scene.box_batches().next().unwrap().primitive_count(), 0);

        // the empty file takes a column slot but no width
        let anchors = anchors(&scene);
        assert_eq!(anchors[2], anchors[3]);
        assert_eq!(scene.aabb.maximum.x(), anchors[3].x() + 1.0);
    }

    #[test]
    fn last_palette_wins_by_default() {
        let mut first = unit_file();
        let mut entries = *first.palette.entries();
        entries[1] = Rgba8::new(255, 0, 0, 255);
        first.palette = Palette::from_entries(entries);
        first.palette_found = true;

        let mut last = unit_file();
        entries[1] = Rgba8::new(0, 0, 255, 255);
        last.palette = Palette::from_entries(entries);
        last.palette_found = true;

        let files = [first, last];
        let scene = Scene::from_vox_files(&files, &SceneSettings::default()).unwrap();
        assert_eq!(scene.palette[1], Rgba8::new(0, 0, 255, 255));

        let settings = SceneSettings {
            palette_policy: PalettePolicy::FirstFileWins,
            ..Default::default()
        };
        let scene = Scene::from_vox_files(&files, &settings).unwrap();
        assert_eq!(scene.palette[1], Rgba8::new(255, 0, 0, 255));
    }

    #[test]
    fn ground_plane_is_last_and_covers_the_scene() {
        let files = vec![unit_file(); 3];
        let scene = Scene::from_vox_files(&files, &SceneSettings::default()).unwrap();

        assert!(matches!(
            scene.primitives.last().map(|p| &p.shape),
            Some(Shape::Parallelogram(_))
        ));
        let ground = scene.ground_plane().unwrap();
        assert!(ground.bounds().contains_footprint(&scene.aabb));
        assert!(ground.anchor.y() >= scene.aabb.minimum.y());
    }

    #[test]
    fn camera_frames_scene_bounds() {
        let files = vec![unit_file()];
        let scene = Scene::from_vox_files(&files, &SceneSettings::default()).unwrap();

        assert_eq!(scene.camera.eye, Vec3(0.0, 1.5, 1.5));
        assert_eq!(scene.camera.lookat, Vec3::splat(0.5));
        assert_eq!(scene.camera.raster_width, 768);
        assert_eq!(scene.camera.raster_height, 576);
    }

    #[test]
    fn rejects_bad_settings() {
        let files = vec![unit_file()];
        let small_ground = SceneSettings {
            ground_plane_scale: 0.5,
            ..Default::default()
        };
        assert!(Scene::from_vox_files(&files, &small_ground).is_err());
        assert!(Scene::from_vox_files(&[], &SceneSettings::default()).is_err());
    }

    #[test]
    fn read_failure_names_the_file() {
        let missing = std::env::temp_dir().join("raytracing-missing-model.vox");
        let _ = std::fs::remove_file(&missing);

        let err = scene_from_vox_files(&[&missing], &SceneSettings::default())
            .err()
            .unwrap();
        let message = format!("{err:#}");
        assert!(message.contains("raytracing-missing-model.vox"), "{message}");
    }

    #[test]
    fn reads_files_from_disk() {
        let path = std::env::temp_dir().join(format!("raytracing-scene-{}.vox", std::process::id()));
        vox::write_vox(&path, &unit_file()).unwrap();

        let scene = scene_from_vox_files(&[&path, &path], &SceneSettings::default()).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(scene.box_batches().count(), 2);
        assert_eq!(scene.palette, Palette::default());
    }
}
