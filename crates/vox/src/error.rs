use std::{io, path::PathBuf};

use thiserror::Error;

use crate::chunk::ChunkId;

/// Structural problems found while decoding a VOX stream. Decoding stops at
/// the first one; nothing after a bad read can be trusted.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("could not open file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("i/o error while reading {what}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("not a VOX file (magic {found})")]
    BadMagic { found: ChunkId },
    #[error("unexpected end of file while reading {what}")]
    ShortRead { what: &'static str },
    #[error("expected {expected} chunk, found {found}")]
    UnexpectedChunk { expected: ChunkId, found: ChunkId },
    #[error("negative {what}: {value}")]
    NegativeLength { what: &'static str, value: i32 },
    #[error("model declares {count} voxels but its extent {dims:?} only holds {capacity}")]
    VoxelCountExceedsBound {
        count: i32,
        dims: [i32; 3],
        capacity: i64,
    },
    // palette indices are 1-based, 0 never names a color
    #[error("voxel {index} of model {model} has color index 0")]
    ZeroColorIndex { model: usize, index: usize },
}
