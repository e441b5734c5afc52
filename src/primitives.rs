//! Fixed-width geometric primitives and the slice cursor used to read them.
//!
//! # Endianness
//! Every multi-byte field is little-endian; floats are IEEE-754 single
//! precision.  Any bit pattern is accepted, NaN and infinities included.
//!
//! | Type      | Width | Layout                          |
//! |-----------|-------|---------------------------------|
//! | `Vector3` | 12 B  | x, y, z                         |
//! | `Plane`   | 16 B  | normal (`Vector3`), distance    |
//! | `Rotator` | 12 B  | pitch, yaw, roll                |

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};

// ── ByteReader ────────────────────────────────────────────────────────────────

/// Cursor over an immutable byte slice.
///
/// Short reads surface as [`ChunkError::InsufficientData`]; the cursor never
/// reads past the end of the slice it was built from.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    /// Start a cursor at offset 0 of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { cursor: Cursor::new(bytes) }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes left before the end of the slice.
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn read_with<T>(
        &mut self,
        width: usize,
        f: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    ) -> Result<T> {
        let available = self.remaining();
        if available < width {
            return Err(ChunkError::InsufficientData { needed: width, available });
        }
        f(&mut self.cursor).map_err(|_| ChunkError::InsufficientData { needed: width, available })
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(2, |c| c.read_u16::<LittleEndian>())
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(4, |c| c.read_u32::<LittleEndian>())
    }

    /// Read a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_with(8, |c| c.read_u64::<LittleEndian>())
    }

    /// Read a little-endian IEEE-754 `f32`, bit pattern preserved.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_with(4, |c| c.read_f32::<LittleEndian>())
    }

    /// Read `N` raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.read_with(N, |c| {
            let mut buf = [0u8; N];
            c.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    /// Read a 12-byte [`Vector3`].
    pub fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
        })
    }

    /// Read a 16-byte [`Plane`].
    pub fn read_plane(&mut self) -> Result<Plane> {
        Ok(Plane {
            normal:   self.read_vector3()?,
            distance: self.read_f32()?,
        })
    }

    /// Read a 12-byte [`Rotator`].
    pub fn read_rotator(&mut self) -> Result<Rotator> {
        Ok(Rotator {
            pitch: self.read_f32()?,
            yaw:   self.read_f32()?,
            roll:  self.read_f32()?,
        })
    }
}

// ── Fixed-width encoding ──────────────────────────────────────────────────────

/// Run `write` over a buffer of exactly `N` bytes.
///
/// Every encoder in this crate writes a constant width, so a short or
/// failed write can only mean the encoder and its declared size disagree.
pub(crate) fn encode_fixed<const N: usize>(
    write: impl FnOnce(&mut &mut [u8]) -> io::Result<()>,
) -> [u8; N] {
    let mut out = [0u8; N];
    let mut sink = &mut out[..];
    let written = write(&mut sink);
    debug_assert!(written.is_ok() && sink.is_empty(), "encoder width mismatch");
    out
}

// ── Vector3 ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const SIZE: usize = 12;

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Decode from the first 12 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        ByteReader::new(bytes).read_vector3()
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.x)?;
        writer.write_f32::<LittleEndian>(self.y)?;
        writer.write_f32::<LittleEndian>(self.z)?;
        Ok(())
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        encode_fixed(|w| self.write(w))
    }
}

// ── Plane ─────────────────────────────────────────────────────────────────────

/// Plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    pub normal:   Vector3,
    pub distance: f32,
}

impl Plane {
    pub const SIZE: usize = 16;

    pub const fn new(normal: Vector3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Decode from the first 16 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        ByteReader::new(bytes).read_plane()
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        self.normal.write(&mut writer)?;
        writer.write_f32::<LittleEndian>(self.distance)?;
        Ok(())
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        encode_fixed(|w| self.write(w))
    }
}

// ── Rotator ───────────────────────────────────────────────────────────────────

/// Euler rotation in degrees, stored pitch first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw:   f32,
    pub roll:  f32,
}

impl Rotator {
    pub const SIZE: usize = 12;

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Decode from the first 12 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        ByteReader::new(bytes).read_rotator()
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_f32::<LittleEndian>(self.pitch)?;
        writer.write_f32::<LittleEndian>(self.yaw)?;
        writer.write_f32::<LittleEndian>(self.roll)?;
        Ok(())
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        encode_fixed(|w| self.write(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector3_layout_is_little_endian() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let bytes = v.encode();
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
        assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());
        assert_eq!(Vector3::decode(&bytes).unwrap(), v);
    }

    #[test]
    fn plane_puts_distance_last() {
        let p = Plane::new(Vector3::new(0.0, 0.0, 1.0), 42.0);
        let bytes = p.encode();
        assert_eq!(&bytes[12..16], &42.0f32.to_le_bytes());
        assert_eq!(Plane::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn short_input_reports_insufficient_data() {
        let err = Plane::decode(&[0u8; 15]).unwrap_err();
        assert_eq!(err, ChunkError::InsufficientData { needed: 4, available: 3 });

        let err = Rotator::decode(&[]).unwrap_err();
        assert_eq!(err, ChunkError::InsufficientData { needed: 4, available: 0 });
    }

    #[test]
    fn nan_bit_patterns_pass_through() {
        let mut raw = [0u8; 12];
        raw[0..4].copy_from_slice(&0x7FC0_1234u32.to_le_bytes());
        raw[4..8].copy_from_slice(&f32::INFINITY.to_le_bytes());
        let v = Vector3::decode(&raw).unwrap();
        assert!(v.x.is_nan());
        assert_eq!(v.encode(), raw);
    }

    #[test]
    fn reader_tracks_position() {
        let data = [1u8, 0, 2, 0, 0, 0, 9];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 1);
        assert_eq!(r.read_u32().unwrap(), 2);
        assert_eq!(r.position(), 6);
        assert_eq!(r.remaining(), 1);
        assert!(r.read_u16().is_err());
        assert_eq!(r.read_array::<1>().unwrap(), [9]);
        assert!(r.is_exhausted());
    }

    #[test]
    fn write_matches_encode() {
        let r = Rotator::new(1.0, 2.0, 3.0);
        let mut streamed = Vec::new();
        r.write(&mut streamed).unwrap();
        assert_eq!(streamed, r.encode());
    }
}
