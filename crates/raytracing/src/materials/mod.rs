use crate::geometry::Vec3;

/// Albedo shared by every voxel. The sun and sky light the scene, so a
/// realistic value keeps interreflection from washing the colors out.
pub const VOXEL_ALBEDO: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Diffuse {
        // multiplied with the palette color of each box
        albedo: Vec3
    },
}

impl Material {
    pub fn voxel_diffuse() -> Material {
        Material::Diffuse {
            albedo: Vec3::splat(VOXEL_ALBEDO),
        }
    }
}
