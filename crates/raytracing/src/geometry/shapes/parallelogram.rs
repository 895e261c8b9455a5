use crate::geometry::{shapes::boxes::VOXEL_COORDINATE_SCALE, Vec3, AABB};

/// Parallelogram from a corner point spanned by two edge vectors.
/// The front face is `cross(edge_u, edge_v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallelogram {
    pub anchor: Vec3,
    pub edge_u: Vec3,
    pub edge_v: Vec3,
}

/// Values as the parallelogram intersection program consumes them: the plane
/// equation and edges pre-divided by their squared length, so that the
/// barycentric coordinates of a hit are plain dot products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelogramParams {
    pub plane: [f32; 4],
    pub v1: Vec3,
    pub v2: Vec3,
    pub anchor: Vec3,
}

impl Parallelogram {
    /// Square ground plane under `scene`: side `scale` times the larger of the
    /// X and Z extents, centred on the box in X and Z, and lifted slightly
    /// above its floor to avoid coinciding with the lowest voxel faces.
    ///
    /// `scale` must be at least 1 for the plane to cover the scene footprint.
    pub fn ground_plane(scene: &AABB, scale: f32) -> Parallelogram {
        // a single voxel column still gets a visible plane
        let footprint = f32::max(scene.extent(0), scene.extent(2)).max(1.0 / VOXEL_COORDINATE_SCALE);
        let side = scale * footprint;
        let center = scene.center();
        let floor = if scene.is_valid() { scene.minimum.y() } else { 0.0 };

        Parallelogram {
            anchor: Vec3(
                center.x() - 0.5 * side,
                floor + 0.001 * scene.extent(1),
                center.z() - 0.5 * side,
            ),
            edge_u: Vec3(0.0, 0.0, side),
            edge_v: Vec3(side, 0.0, 0.0),
        }
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::normalized(Vec3::cross(self.edge_u, self.edge_v))
    }

    pub fn bounds(&self) -> AABB {
        let mut aabb = AABB::empty();
        for corner in [
            self.anchor,
            self.anchor + self.edge_u,
            self.anchor + self.edge_v,
            self.anchor + self.edge_u + self.edge_v,
        ] {
            aabb.include_point(corner);
        }
        aabb
    }

    pub fn kernel_params(&self) -> ParallelogramParams {
        let normal = self.normal();
        let d = Vec3::dot(normal, self.anchor);
        ParallelogramParams {
            plane: [normal.x(), normal.y(), normal.z(), d],
            v1: self.edge_u / Vec3::dot(self.edge_u, self.edge_u),
            v2: self.edge_v / Vec3::dot(self.edge_v, self.edge_v),
            anchor: self.anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_plane_covers_footprint() {
        let scene = AABB::new(Vec3(-1.0, 0.5, 2.0), Vec3(3.0, 1.5, 3.0));
        let ground = Parallelogram::ground_plane(&scene, 2.0);
        let bounds = ground.bounds();

        assert!(bounds.contains_footprint(&scene));
        assert_eq!(bounds.extent(0), 8.0);
        assert_eq!(bounds.extent(2), 8.0);
        assert_eq!(bounds.center().x(), scene.center().x());
        assert_eq!(bounds.center().z(), scene.center().z());
        assert!(ground.anchor.y() > scene.minimum.y());
        assert!(ground.anchor.y() < scene.minimum.y() + 0.01);
    }

    #[test]
    fn ground_plane_faces_up() {
        let scene = AABB::new(Vec3::zero(), Vec3(1.0, 1.0, 1.0));
        let ground = Parallelogram::ground_plane(&scene, 2.0);
        assert_eq!(ground.normal(), Vec3(0.0, 1.0, 0.0));

        let params = ground.kernel_params();
        assert_eq!(params.plane[3], ground.anchor.y());
        assert_eq!(Vec3::dot(params.v1, ground.edge_u), 1.0);
        assert_eq!(Vec3::dot(params.v2, ground.edge_v), 1.0);
    }

    #[test]
    fn degenerate_scene_still_gets_a_plane() {
        let mut scene = AABB::empty();
        scene.include_point(Vec3(0.5, 0.0, 0.5));
        let ground = Parallelogram::ground_plane(&scene, 2.0);
        assert!(ground.bounds().extent(0) > 0.0);
        assert!(ground.bounds().contains_footprint(&scene));
    }
}
