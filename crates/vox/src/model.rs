use bytemuck::{Pod, Zeroable};

/// One occupied voxel. Coordinates are already in the Y-up convention.
/// `color_index` is 1-based into the file's palette.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Voxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub color_index: u8,
}

impl Voxel {
    pub const fn new(x: u8, y: u8, z: u8, color_index: u8) -> Voxel {
        Voxel { x, y, z, color_index }
    }
}

/// A single model of a VOX file: its grid extents and sparse voxel list.
///
/// `dims` is Y-up (the on-disk Y and Z extents are swapped). It only bounds
/// the voxel count; coordinates are allowed to reach `dims` itself since
/// some authoring tools write them that way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelModel {
    pub dims: [i32; 3],
    pub voxels: Vec<Voxel>,
}

impl VoxelModel {
    /// Number of cells in the declared grid, saturating at `i64::MAX`
    pub fn capacity(&self) -> i64 {
        self.dims.iter().fold(1i64, |acc, &d| acc.saturating_mul(d as i64))
    }

    /// Min and max of the occupied coordinates, which can be tighter than `dims`
    pub fn tight_bounds(&self) -> Option<([u8; 3], [u8; 3])> {
        let first = self.voxels.first()?;
        let init = ([first.x, first.y, first.z], [first.x, first.y, first.z]);

        Some(self.voxels.iter().fold(init, |(mut lo, mut hi), v| {
            for (axis, c) in [v.x, v.y, v.z].into_iter().enumerate() {
                lo[axis] = lo[axis].min(c);
                hi[axis] = hi[axis].max(c);
            }
            (lo, hi)
        }))
    }

    /// The voxel records as the packed 4 byte tuples a box buffer expects
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_bounds_ignore_dims() {
        let model = VoxelModel {
            dims: [100, 100, 100],
            voxels: vec![Voxel::new(4, 9, 2, 1), Voxel::new(7, 3, 2, 1), Voxel::new(5, 5, 8, 3)],
        };
        assert_eq!(model.tight_bounds(), Some(([4, 3, 2], [7, 9, 8])));
    }

    #[test]
    fn empty_model_has_no_bounds() {
        let model = VoxelModel { dims: [1, 1, 1], voxels: Vec::new() };
        assert_eq!(model.tight_bounds(), None);
        assert_eq!(model.capacity(), 1);
    }

    #[test]
    fn huge_extent_capacity_saturates() {
        let model = VoxelModel { dims: [i32::MAX; 3], voxels: Vec::new() };
        assert_eq!(model.capacity(), i64::MAX);

        let model = VoxelModel { dims: [1 << 20, 1 << 20, 1 << 20], voxels: Vec::new() };
        assert_eq!(model.capacity(), 1 << 60);
    }

    #[test]
    fn voxel_bytes_are_packed_in_field_order() {
        let model = VoxelModel {
            dims: [2, 2, 2],
            voxels: vec![Voxel::new(1, 2, 3, 4), Voxel::new(5, 6, 7, 8)],
        };
        assert_eq!(model.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
