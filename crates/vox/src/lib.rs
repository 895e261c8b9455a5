//! Reader for the MagicaVoxel `.vox` container.
//!
//! Supported subset: an optional `PACK` chunk, one `SIZE`/`XYZI` pair per
//! model and an optional trailing `RGBA` palette. Material, scene graph and
//! layer chunks are reported and ignored (see [`ChunkPolicy`]).
//!
//! Models are converted from the file's Z-up grid to Y-up on load: the Y and
//! Z extents swap, and each voxel becomes `(x, z, dims.z - y)` where `dims`
//! is the already swapped extent.

mod chunk;
mod error;
mod model;
mod palette;
mod reader;
mod writer;


pub use chunk::{ChunkHeader, ChunkId};
pub use error::FormatError;
pub use model::{Voxel, VoxelModel};
pub use palette::{Palette, Rgba8, DEFAULT_PALETTE};
pub use reader::{read_vox, read_vox_with, ChunkPolicy, ReadOptions, VoxFile};
pub use writer::write_vox;
