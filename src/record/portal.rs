//! Portal record (20 bytes): a run of portal vertices plus the plane they lie in.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::primitives::{ByteReader, Plane};
use super::{Record, WritableRecord};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Portal {
    /// First vertex in the portal-vertex list.  Opaque to this crate.
    pub base_vertex_index: u16,
    pub vertex_count:      u16,
    pub plane:             Plane,
}

impl Record for Portal {
    const SIZE: usize = 20;

    fn read_fields(r: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            base_vertex_index: r.read_u16()?,
            vertex_count:      r.read_u16()?,
            plane:             r.read_plane()?,
        })
    }
}

impl WritableRecord for Portal {
    fn write_fields<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.base_vertex_index)?;
        writer.write_u16::<LittleEndian>(self.vertex_count)?;
        self.plane.write(writer)?;
        Ok(())
    }
}
