//! Doodad/model placement entry (36 bytes).
//!
//! ```text
//! off  size  field
//!   0     4  model_index   u32   index into the tile's model-name list
//!   4     4  unique_id     u32
//!   8    12  position      Vector3
//!  20    12  rotation      Rotator
//!  32     2  scale         u16   fixed point, 1024 = 1.0
//!  34     2  flags         u16
//! ```

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::primitives::{ByteReader, Rotator, Vector3};
use super::{Record, WritableRecord};

/// Fixed-point denominator of [`ModelPlacementEntry::scale`].
pub const SCALE_ONE: u16 = 1024;

// ── ModelPlacementFlags ───────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Placement flag bits.  Decoded with `from_bits_retain`, so bits
    /// without a name survive a round trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModelPlacementFlags: u16 {
        /// Skybox-like enclosing model.
        const BIODOME   = 0x0001;
        /// Vegetation and ground clutter.
        const SHRUBBERY = 0x0002;
    }
}

impl ModelPlacementFlags {
    pub fn is_biodome(&self) -> bool {
        self.contains(Self::BIODOME)
    }

    pub fn is_shrubbery(&self) -> bool {
        self.contains(Self::SHRUBBERY)
    }

    /// Bits outside the named set.
    pub fn unknown_bits(&self) -> u16 {
        self.bits() & !Self::all().bits()
    }
}

// Raw bits on the wire, unknown bits included.
impl Serialize for ModelPlacementFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModelPlacementFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self::from_bits_retain(u16::deserialize(deserializer)?))
    }
}

// ── ModelPlacementEntry ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacementEntry {
    /// Opaque index into the model list; never validated here.
    pub model_index: u32,
    pub unique_id:   u32,
    pub position:    Vector3,
    pub rotation:    Rotator,
    pub scale:       u16,
    pub flags:       ModelPlacementFlags,
}

impl Default for ModelPlacementEntry {
    fn default() -> Self {
        Self {
            model_index: 0,
            unique_id:   0,
            position:    Vector3::default(),
            rotation:    Rotator::default(),
            scale:       SCALE_ONE,
            flags:       ModelPlacementFlags::empty(),
        }
    }
}

impl ModelPlacementEntry {
    /// Uniform scale as a float.
    pub fn scale_factor(&self) -> f32 {
        f32::from(self.scale) / f32::from(SCALE_ONE)
    }
}

impl Record for ModelPlacementEntry {
    const SIZE: usize = 36;

    fn read_fields(r: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            model_index: r.read_u32()?,
            unique_id:   r.read_u32()?,
            position:    r.read_vector3()?,
            rotation:    r.read_rotator()?,
            scale:       r.read_u16()?,
            flags:       ModelPlacementFlags::from_bits_retain(r.read_u16()?),
        })
    }
}

impl WritableRecord for ModelPlacementEntry {
    fn write_fields<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.model_index)?;
        writer.write_u32::<LittleEndian>(self.unique_id)?;
        self.position.write(&mut *writer)?;
        self.rotation.write(&mut *writer)?;
        writer.write_u16::<LittleEndian>(self.scale)?;
        writer.write_u16::<LittleEndian>(self.flags.bits())?;
        Ok(())
    }
}
