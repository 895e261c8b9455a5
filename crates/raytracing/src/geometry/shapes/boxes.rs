use vox::{Voxel, VoxelModel};

use crate::geometry::{Vec3, AABB};

/// Voxel coordinates are bytes; the box kernel maps them into `[0, 1]`
pub const VOXEL_COORDINATE_SCALE: f32 = 255.0;

/// One model's worth of box primitives, positioned at `anchor`.
#[derive(Debug, Clone)]
pub struct BoxBatch {
    pub model: VoxelModel,
    pub anchor: Vec3,
}

impl BoxBatch {
    pub fn new(model: VoxelModel, anchor: Vec3) -> BoxBatch {
        BoxBatch { model, anchor }
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.model.voxels
    }

    pub fn primitive_count(&self) -> usize {
        self.model.voxels.len()
    }

    /// Contents of the per-primitive `uchar4` buffer, voxels unmodified
    pub fn as_bytes(&self) -> &[u8] {
        self.model.as_bytes()
    }

    /// World position of a voxel's grid coordinate
    pub fn voxel_position(&self, voxel: &Voxel) -> Vec3 {
        self.anchor + Self::normalized([voxel.x, voxel.y, voxel.z])
    }

    /// Tight bounds of the occupied voxel coordinates (origins, not far
    /// corners), empty if there are none
    pub fn bounds(&self) -> AABB {
        let Some((lo, hi)) = self.model.tight_bounds() else {
            return AABB::empty();
        };

        AABB::new(
            self.anchor + Self::normalized(lo),
            self.anchor + Self::normalized(hi),
        )
    }

    fn normalized(coords: [u8; 3]) -> Vec3 {
        Vec3::from(coords) / Vec3::splat(VOXEL_COORDINATE_SCALE)
    }
}
