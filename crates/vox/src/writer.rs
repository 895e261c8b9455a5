//! Writer for the same subset the reader understands, undoing the Y-up
//! conversion so that writing and reading a file gives back the same models.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{chunk::ChunkId, model::VoxelModel, reader::VoxFile, palette::Palette};

const VERSION: i32 = 150;

fn write_chunk<W: Write>(w: &mut W, id: ChunkId, content: &[u8]) -> io::Result<()> {
    w.write_all(&id.0)?;
    w.write_all(&(content.len() as i32).to_le_bytes())?;
    w.write_all(&0i32.to_le_bytes())?;
    w.write_all(content)
}

fn model_chunks<W: Write>(w: &mut W, model: &VoxelModel) -> io::Result<()> {
    let [x, y, z] = model.dims;
    let mut size = Vec::with_capacity(12);
    // back to z-up: on-disk y is the in-memory z extent
    for d in [x, z, y] {
        size.extend_from_slice(&d.to_le_bytes());
    }
    write_chunk(w, ChunkId::SIZE, &size)?;

    let mut xyzi = Vec::with_capacity(4 + 4 * model.voxels.len());
    xyzi.extend_from_slice(&(model.voxels.len() as i32).to_le_bytes());
    for v in &model.voxels {
        let disk_y = (model.dims[2] - v.z as i32) as u8;
        xyzi.extend_from_slice(&[v.x, disk_y, v.y, v.color_index]);
    }
    write_chunk(w, ChunkId::XYZI, &xyzi)
}

impl VoxFile {
    /// Encodes the file. `PACK` is written only for multi-model files and
    /// `RGBA` only when `palette_found` is set.
    pub fn write<W: Write>(&self, mut w: W) -> io::Result<()> {
        let mut children = Vec::new();
        if self.models.len() > 1 {
            write_chunk(&mut children, ChunkId::PACK, &(self.models.len() as i32).to_le_bytes())?;
        }
        for model in &self.models {
            model_chunks(&mut children, model)?;
        }
        if self.palette_found {
            write_chunk(&mut children, ChunkId::RGBA, self.palette.as_bytes())?;
        }

        w.write_all(b"VOX ")?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&ChunkId::MAIN.0)?;
        w.write_all(&0i32.to_le_bytes())?;
        w.write_all(&(children.len() as i32).to_le_bytes())?;
        w.write_all(&children)?;
        w.flush()
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }

    /// Convenience constructor for a file with an explicit palette
    pub fn with_palette(models: Vec<VoxelModel>, palette: Palette) -> VoxFile {
        VoxFile {
            version: VERSION,
            models,
            palette,
            palette_found: true,
        }
    }
}

pub fn write_vox<P: AsRef<Path>>(path: P, file: &VoxFile) -> io::Result<()> {
    file.write(BufWriter::new(File::create(path)?))
}
