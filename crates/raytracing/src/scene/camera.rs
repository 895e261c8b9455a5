use crate::geometry::{Vec3, AABB};

pub const DEFAULT_RASTER_WIDTH: usize = 768;
pub const DEFAULT_RASTER_HEIGHT: usize = 576;
const DEFAULT_YFOV_DEGREES: f32 = 35.0;

/// Pinhole camera described by a look-at frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub lookat: Vec3,
    pub up: Vec3,
    pub yfov: f32, // radians
    pub raster_width: usize,
    pub raster_height: usize,
}

/// Ray generation basis: primary rays go through `eye + W + s*U + t*V`
/// for `s, t` in `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Camera {
    /// Default view of a scene: raised above and in front of the origin
    /// (positive Z), looking at the centre of `aabb`, Y up.
    pub fn framing(aabb: &AABB, raster_width: usize, raster_height: usize) -> Camera {
        Camera {
            eye: Vec3(0.0, 1.5 * aabb.extent(1), 1.5 * aabb.extent(2)),
            lookat: aabb.center(),
            up: Vec3(0.0, 1.0, 0.0),
            yfov: DEFAULT_YFOV_DEGREES.to_radians(),
            raster_width,
            raster_height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.raster_width as f32 / self.raster_height as f32
    }

    pub fn frame(&self) -> CameraFrame {
        let w = self.lookat - self.eye;
        let wlen = w.length();
        let vlen = wlen * f32::tan(0.5 * self.yfov);
        let ulen = vlen * self.aspect_ratio();

        let u = Vec3::normalized(Vec3::cross(w, self.up)) * ulen;
        let v = Vec3::normalized(Vec3::cross(u, w)) * vlen;
        CameraFrame { eye: self.eye, u, v, w }
    }
}
