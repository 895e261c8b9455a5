use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    chunk::{read_field, read_i32, skip_bytes, ChunkHeader, ChunkId},
    error::FormatError,
    model::{Voxel, VoxelModel},
    palette::Palette,
};

const MAGIC: ChunkId = ChunkId(*b"VOX ");

/// How chunks the reader does not understand are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Only the fixed `PACK`, `SIZE`/`XYZI` x N, `RGBA` sequence is understood.
    /// An unknown chunk in the palette slot and one chunk after it are
    /// reported, and nothing further is read. Unknown chunks between models
    /// are format errors.
    #[default]
    Strict,
    /// Unknown chunks anywhere are reported and skipped using their declared
    /// lengths, and the whole tail of the file is searched for `RGBA`.
    SkipUnknown,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    pub chunk_policy: ChunkPolicy,
}

/// Everything decoded from one `.vox` file
#[derive(Debug, Clone, PartialEq)]
pub struct VoxFile {
    pub version: i32,
    pub models: Vec<VoxelModel>,
    pub palette: Palette,
    /// `false` when `palette` is the built-in default
    pub palette_found: bool,
}

impl VoxFile {
    pub fn from_reader<R: Read>(reader: R, options: &ReadOptions) -> Result<VoxFile, FormatError> {
        VoxReader::new(reader, *options, None).read()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<VoxFile, FormatError> {
        Self::from_reader(bytes, &ReadOptions::default())
    }
}

/// Reads a `.vox` file with the default (strict) options.
pub fn read_vox<P: AsRef<Path>>(path: P) -> Result<VoxFile, FormatError> {
    read_vox_with(path, &ReadOptions::default())
}

pub fn read_vox_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<VoxFile, FormatError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    VoxReader::new(BufReader::new(file), *options, Some(path.display().to_string())).read()
}

struct VoxReader<R> {
    reader: R,
    options: ReadOptions,
    // used for diagnostics only
    source_name: Option<String>,
}

impl<R: Read> VoxReader<R> {
    fn new(reader: R, options: ReadOptions, source_name: Option<String>) -> Self {
        VoxReader { reader, options, source_name }
    }

    fn read(mut self) -> Result<VoxFile, FormatError> {
        let mut magic = [0u8; 4];
        read_field(&mut self.reader, &mut magic, "magic")?;
        if ChunkId(magic) != MAGIC {
            return Err(FormatError::BadMagic { found: ChunkId(magic) });
        }

        // not branched on; chunk ids carry the structure
        let version = read_i32(&mut self.reader, "version")?;

        // the declared MAIN lengths are not checked against what is consumed
        let main_header = ChunkHeader::read(&mut self.reader)?;
        debug!(version, main = %main_header.id, children = main_header.num_child_bytes, "vox header");

        let mut header = self.next_header(&[ChunkId::PACK, ChunkId::SIZE])?;

        let mut num_models = 1;
        if header.id == ChunkId::PACK {
            num_models = read_i32(&mut self.reader, "model count")?;
            if num_models < 0 {
                return Err(FormatError::NegativeLength {
                    what: "model count",
                    value: num_models,
                });
            }
            debug!(num_models, "found pack");
            header = self.next_header(&[ChunkId::SIZE])?;
        }

        // the first model is read even if PACK declared none
        let mut models = Vec::with_capacity(num_models.max(1) as usize);
        models.push(self.read_model(0, header)?);
        for index in 1..num_models as usize {
            let header = self.next_header(&[ChunkId::SIZE])?;
            models.push(self.read_model(index, header)?);
        }

        let palette = match self.options.chunk_policy {
            ChunkPolicy::Strict => self.read_palette_strict()?,
            ChunkPolicy::SkipUnknown => self.read_palette_skipping()?,
        };
        let palette_found = palette.is_some();

        Ok(VoxFile {
            version,
            models,
            palette: palette.unwrap_or_default(),
            palette_found,
        })
    }

    /// Reads the next required chunk header. With `SkipUnknown`, chunks whose
    /// id is not in `wanted` are skipped first.
    fn next_header(&mut self, wanted: &[ChunkId]) -> Result<ChunkHeader, FormatError> {
        loop {
            let header = ChunkHeader::read(&mut self.reader)?;
            if self.options.chunk_policy == ChunkPolicy::Strict || wanted.contains(&header.id) {
                return Ok(header);
            }
            self.report_ignored(&header);
            header.skip_payload(&mut self.reader)?;
        }
    }

    /// Decodes the SIZE chunk whose header is `size_header` and the XYZI chunk after it
    fn read_model(&mut self, index: usize, size_header: ChunkHeader) -> Result<VoxelModel, FormatError> {
        if size_header.id != ChunkId::SIZE {
            return Err(FormatError::UnexpectedChunk {
                expected: ChunkId::SIZE,
                found: size_header.id,
            });
        }

        let dim_x = read_i32(&mut self.reader, "SIZE x")?;
        let dim_y = read_i32(&mut self.reader, "SIZE y")?;
        let dim_z = read_i32(&mut self.reader, "SIZE z")?;

        for (what, value) in [("SIZE x", dim_x), ("SIZE y", dim_y), ("SIZE z", dim_z)] {
            if value < 0 {
                return Err(FormatError::NegativeLength { what, value });
            }
        }

        // z-up on disk, y-up in memory
        let dims = [dim_x, dim_z, dim_y];
        debug!(model = index, ?dims, "model dims");

        let voxel_header = self.next_header(&[ChunkId::XYZI])?;
        if voxel_header.id != ChunkId::XYZI {
            return Err(FormatError::UnexpectedChunk {
                expected: ChunkId::XYZI,
                found: voxel_header.id,
            });
        }

        let num_voxels = read_i32(&mut self.reader, "voxel count")?;
        if num_voxels < 0 {
            return Err(FormatError::NegativeLength {
                what: "voxel count",
                value: num_voxels,
            });
        }

        let mut model = VoxelModel { dims, voxels: Vec::new() };
        let capacity = model.capacity();
        if num_voxels as i64 > capacity {
            return Err(FormatError::VoxelCountExceedsBound {
                count: num_voxels,
                dims,
                capacity,
            });
        }
        debug!(model = index, num_voxels, "reading voxels");

        model.voxels.reserve(num_voxels.min(1 << 20) as usize);
        for voxel_index in 0..num_voxels as usize {
            let mut raw = [0u8; 4];
            read_field(&mut self.reader, &mut raw, "voxel record")?;
            let [x, disk_y, disk_z, color_index] = raw;

            if color_index == 0 {
                return Err(FormatError::ZeroColorIndex {
                    model: index,
                    index: voxel_index,
                });
            }

            // Coordinates equal to dims have been seen in real files; they are
            // only ever used as offsets, so no range check. The flip wraps like
            // the byte it is stored in.
            let y = disk_z;
            let z = dims[2].wrapping_sub(disk_y as i32) as u8;
            model.voxels.push(Voxel::new(x, y, z, color_index));
        }

        Ok(model)
    }

    fn read_palette_strict(&mut self) -> Result<Option<Palette>, FormatError> {
        let mut palette = None;
        if let Some(header) = ChunkHeader::read_optional(&mut self.reader)? {
            if header.id == ChunkId::RGBA {
                palette = Some(self.read_palette_payload()?);
            } else {
                self.report_ignored(&header);
            }
        }

        if let Some(header) = ChunkHeader::read_optional(&mut self.reader)? {
            self.report_ignored(&header);
        }

        Ok(palette)
    }

    fn read_palette_skipping(&mut self) -> Result<Option<Palette>, FormatError> {
        let mut palette = None;
        while let Some(header) = ChunkHeader::read_optional(&mut self.reader)? {
            if header.id == ChunkId::RGBA && palette.is_none() {
                palette = Some(self.read_palette_payload()?);
                let rest = header.payload_len()?.saturating_sub(Palette::SIZE_IN_BYTES as u64);
                skip_bytes(&mut self.reader, rest)?;
            } else {
                self.report_ignored(&header);
                header.skip_payload(&mut self.reader)?;
            }
        }
        Ok(palette)
    }

    fn read_palette_payload(&mut self) -> Result<Palette, FormatError> {
        let mut raw = [0u8; Palette::SIZE_IN_BYTES];
        read_field(&mut self.reader, &mut raw, "palette")?;
        Ok(Palette::from_raw(&raw))
    }

    fn report_ignored(&self, header: &ChunkHeader) {
        warn!(
            file = self.source_name.as_deref().unwrap_or("<memory>"),
            num_bytes = header.num_bytes,
            num_child_bytes = header.num_child_bytes,
            "ignoring chunk {}",
            header.id
        );
    }
}
