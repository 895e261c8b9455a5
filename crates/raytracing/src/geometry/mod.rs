mod aabb;
mod shapes;
mod vec3;

pub use aabb::AABB;
pub use vec3::Vec3;

pub use shapes::boxes::{BoxBatch, VOXEL_COORDINATE_SCALE};
pub use shapes::parallelogram::{Parallelogram, ParallelogramParams};
pub use shapes::Shape;
