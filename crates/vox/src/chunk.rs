//! Chunk framing for the VOX container.
//!
//! Every section of a file is introduced by a 12 byte header: a 4 byte tag
//! followed by the content length and the length of all child chunks, both
//! little-endian `i32`.

use std::{fmt, io::{self, Read}};

use crate::error::FormatError;

/// 4 byte chunk tag, stored exactly as it appears on disk (no terminator)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const MAIN: ChunkId = ChunkId(*b"MAIN");
    pub const PACK: ChunkId = ChunkId(*b"PACK");
    pub const SIZE: ChunkId = ChunkId(*b"SIZE");
    pub const XYZI: ChunkId = ChunkId(*b"XYZI");
    pub const RGBA: ChunkId = ChunkId(*b"RGBA");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    pub num_bytes: i32,
    pub num_child_bytes: i32,
}

impl ChunkHeader {
    pub const SIZE_IN_BYTES: usize = 12;

    /// Reads a header that is required to be present.
    pub fn read<R: Read>(reader: &mut R) -> Result<ChunkHeader, FormatError> {
        let mut raw = [0u8; Self::SIZE_IN_BYTES];
        read_field(reader, &mut raw, "chunk header")?;
        Ok(Self::from_raw(raw))
    }

    /// Reads a header in an optional slot. Running out of data before a full
    /// header has been read means there is no chunk, not that the file is
    /// truncated.
    pub fn read_optional<R: Read>(reader: &mut R) -> Result<Option<ChunkHeader>, FormatError> {
        let mut raw = [0u8; Self::SIZE_IN_BYTES];
        match reader.read_exact(&mut raw) {
            Ok(()) => Ok(Some(Self::from_raw(raw))),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(source) => Err(FormatError::Io { what: "chunk header", source }),
        }
    }

    /// Total number of bytes following the header that belong to this chunk
    pub fn payload_len(&self) -> Result<u64, FormatError> {
        if self.num_bytes < 0 || self.num_child_bytes < 0 {
            return Err(FormatError::NegativeLength {
                what: "chunk length",
                value: self.num_bytes.min(self.num_child_bytes),
            });
        }
        Ok(self.num_bytes as u64 + self.num_child_bytes as u64)
    }

    /// Consumes the content and children of this chunk without interpreting them
    pub fn skip_payload<R: Read>(&self, reader: &mut R) -> Result<(), FormatError> {
        skip_bytes(reader, self.payload_len()?)
    }

    fn from_raw(raw: [u8; Self::SIZE_IN_BYTES]) -> ChunkHeader {
        ChunkHeader {
            id: ChunkId([raw[0], raw[1], raw[2], raw[3]]),
            num_bytes: i32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
            num_child_bytes: i32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]),
        }
    }
}

/// Fills `buf` completely or fails with a short read naming `what`
pub(crate) fn read_field<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
) -> Result<(), FormatError> {
    reader.read_exact(buf).map_err(|source| match source.kind() {
        io::ErrorKind::UnexpectedEof => FormatError::ShortRead { what },
        _ => FormatError::Io { what, source },
    })
}

pub(crate) fn skip_bytes<R: Read>(reader: &mut R, len: u64) -> Result<(), FormatError> {
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())
        .map_err(|source| FormatError::Io { what: "chunk payload", source })?;
    if skipped != len {
        return Err(FormatError::ShortRead { what: "chunk payload" });
    }
    Ok(())
}

pub(crate) fn read_i32<R: Read>(reader: &mut R, what: &'static str) -> Result<i32, FormatError> {
    let mut raw = [0u8; 4];
    read_field(reader, &mut raw, what)?;
    Ok(i32::from_le_bytes(raw))
}
