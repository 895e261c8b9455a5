//! Primitives are the basic unit handed to a backend, a convention adopted from PBRT.
//! A voxel scene is a single flat geometry group: one primitive per voxel
//! model plus the ground plane, all under one acceleration structure.
//!
//! - The smallest unit that carries a material is a whole shape (a box batch
//!   or the ground plane), not an individual box
//! - Per-box color comes from the box's palette index, not from the material;
//!   the material only scales it

use crate::geometry::Shape;

/// Index into the owning Scene's material array
pub type MaterialIndex = u32;

/// A shape and the material it is shaded with
#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub material: MaterialIndex,
}
