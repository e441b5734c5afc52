//! `MMDF`: model placements for a terrain tile.
//!
//! Counted by division: `len / 36` entries, trailing bytes handled per
//! [`DecodeOptions`].

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::framing::{decode_records_fixed_count, encode_records, DecodeOptions};
use crate::record::ModelPlacementEntry;
use super::{Chunk, Signature, WritableChunk};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainModelPlacementInfo {
    /// Entries in file order.
    pub entries: Vec<ModelPlacementEntry>,
}

impl TerrainModelPlacementInfo {
    pub const SIGNATURE: Signature = Signature(*b"MMDF");

    /// Empty chunk, ready to be filled and serialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient load of an `MMDF` payload.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        Self::load(payload)
    }
}

impl Chunk for TerrainModelPlacementInfo {
    fn signature(&self) -> Signature {
        Self::SIGNATURE
    }

    fn record_count(&self) -> usize {
        self.entries.len()
    }

    fn load_with(payload: &[u8], opts: &DecodeOptions) -> Result<Self> {
        let entries: Vec<ModelPlacementEntry> = decode_records_fixed_count(payload, opts)?;
        trace!(
            signature = %Self::SIGNATURE,
            len = payload.len(),
            count = entries.len(),
            "decoded model placements"
        );
        Ok(Self { entries })
    }

    fn as_writable(&self) -> Option<&dyn WritableChunk> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl WritableChunk for TerrainModelPlacementInfo {
    fn serialize(&self) -> Vec<u8> {
        encode_records(&self.entries)
    }
}
