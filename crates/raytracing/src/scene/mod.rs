mod camera;
mod layout;
mod primitive;
mod scene;

pub use camera::{Camera, CameraFrame, DEFAULT_RASTER_HEIGHT, DEFAULT_RASTER_WIDTH};
pub use layout::GridLayout;
pub use primitive::{MaterialIndex, Primitive};
pub use scene::{scene_from_vox_files, Scene};
