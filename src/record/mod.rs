//! Fixed-size record layouts.
//!
//! A record knows its own on-disk width and how to materialise itself from
//! exactly that many bytes.  How many records a payload holds is the framing
//! layer's business; see [`crate::framing`].

use std::io::{self, Write};

use crate::error::{ChunkError, Result};
use crate::primitives::{ByteReader, Plane};

pub mod placement;
pub mod portal;

pub use placement::{ModelPlacementEntry, ModelPlacementFlags};
pub use portal::Portal;

// ── Record traits ─────────────────────────────────────────────────────────────

pub trait Record: Sized {
    /// Encoded width in bytes.  Constant per type.
    const SIZE: usize;

    /// Read the fields from a reader positioned at the start of the record.
    /// The reader is guaranteed to hold at least `SIZE` bytes.
    fn read_fields(reader: &mut ByteReader<'_>) -> Result<Self>;

    /// Decode the first `SIZE` bytes of `bytes`.  Anything after that
    /// belongs to the next record and is left untouched.
    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(ChunkError::TruncatedRecord {
                record_size: Self::SIZE,
                remaining:   bytes.len(),
            });
        }
        Self::read_fields(&mut ByteReader::new(&bytes[..Self::SIZE]))
    }

    /// Declared width; same as `Self::SIZE`.
    fn size() -> usize {
        Self::SIZE
    }
}

pub trait WritableRecord: Record {
    /// Write the fields in on-disk order, exactly `Self::SIZE` bytes.
    fn write_fields<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    /// Append the encoded record to `out`.
    fn encode_into(&self, out: &mut Vec<u8>) {
        let start = out.len();
        let written = self.write_fields(&mut *out);
        debug_assert!(
            written.is_ok() && out.len() - start == Self::SIZE,
            "record width mismatch"
        );
    }

    /// Encode into a fresh buffer of `Self::SIZE` bytes.
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.encode_into(&mut out);
        out
    }
}

// Planes double as records in plane-sequence chunks.
impl Record for Plane {
    const SIZE: usize = Plane::SIZE;

    fn read_fields(reader: &mut ByteReader<'_>) -> Result<Self> {
        reader.read_plane()
    }
}

impl WritableRecord for Plane {
    fn write_fields<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write(writer)
    }
}
