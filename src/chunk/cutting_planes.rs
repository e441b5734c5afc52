//! `MOPL`: terrain cutting planes of a world-model group.
//!
//! No count field: the payload is a flat run of 16-byte planes consumed
//! until it is exhausted, so its length must be an exact multiple of 16.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::framing::{decode_records_until_exhausted, encode_records, DecodeOptions};
use crate::primitives::Plane;
use super::{Chunk, Signature, WritableChunk};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelTerrainCuttingPlanes {
    pub cutting_planes: Vec<Plane>,
}

impl ModelTerrainCuttingPlanes {
    pub const SIGNATURE: Signature = Signature(*b"MOPL");

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        Self::load(payload)
    }
}

impl Chunk for ModelTerrainCuttingPlanes {
    fn signature(&self) -> Signature {
        Self::SIGNATURE
    }

    fn record_count(&self) -> usize {
        self.cutting_planes.len()
    }

    // Exhaustion framing has no lenient mode, so `opts` does not apply.
    fn load_with(payload: &[u8], _opts: &DecodeOptions) -> Result<Self> {
        let cutting_planes: Vec<Plane> = decode_records_until_exhausted(payload)?;
        trace!(
            signature = %Self::SIGNATURE,
            len = payload.len(),
            count = cutting_planes.len(),
            "decoded cutting planes"
        );
        Ok(Self { cutting_planes })
    }

    fn as_writable(&self) -> Option<&dyn WritableChunk> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl WritableChunk for ModelTerrainCuttingPlanes {
    fn serialize(&self) -> Vec<u8> {
        encode_records(&self.cutting_planes)
    }
}
