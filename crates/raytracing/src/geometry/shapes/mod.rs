use crate::geometry::AABB;

pub mod boxes;
pub mod parallelogram;

use boxes::BoxBatch;
use parallelogram::Parallelogram;

/// Geometry handed to a rendering backend. Each variant pairs with one
/// bounds/intersection program pair on the device side.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Unit boxes at `anchor + voxel / 255`, one primitive per voxel
    VoxelBoxes(BoxBatch),
    Parallelogram(Parallelogram),
}

impl Shape {
    pub fn primitive_count(&self) -> usize {
        match self {
            Shape::VoxelBoxes(batch) => batch.primitive_count(),
            Shape::Parallelogram(_) => 1,
        }
    }

    pub fn bounds(&self) -> AABB {
        match self {
            Shape::VoxelBoxes(batch) => batch.bounds(),
            Shape::Parallelogram(parallelogram) => parallelogram.bounds(),
        }
    }
}
