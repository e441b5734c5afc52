//! `MOPT`: portal descriptors of a world-model root file.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::framing::{decode_records_fixed_count, encode_records, DecodeOptions};
use crate::record::Portal;
use super::{Chunk, Signature, WritableChunk};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPortals {
    pub portals: Vec<Portal>,
}

impl ModelPortals {
    pub const SIGNATURE: Signature = Signature(*b"MOPT");

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        Self::load(payload)
    }
}

impl Chunk for ModelPortals {
    fn signature(&self) -> Signature {
        Self::SIGNATURE
    }

    fn record_count(&self) -> usize {
        self.portals.len()
    }

    fn load_with(payload: &[u8], opts: &DecodeOptions) -> Result<Self> {
        let portals: Vec<Portal> = decode_records_fixed_count(payload, opts)?;
        trace!(
            signature = %Self::SIGNATURE,
            len = payload.len(),
            count = portals.len(),
            "decoded portals"
        );
        Ok(Self { portals })
    }

    fn as_writable(&self) -> Option<&dyn WritableChunk> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl WritableChunk for ModelPortals {
    fn serialize(&self) -> Vec<u8> {
        encode_records(&self.portals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Plane, Vector3};

    #[test]
    fn portals_serialize_in_file_order() {
        let chunk = ModelPortals {
            portals: vec![
                Portal { base_vertex_index: 0, vertex_count: 4, plane: Plane::new(Vector3::new(1.0, 0.0, 0.0), 2.0) },
                Portal { base_vertex_index: 4, vertex_count: 3, plane: Plane::new(Vector3::new(0.0, 1.0, 0.0), -1.0) },
            ],
        };
        let bytes = WritableChunk::serialize(&chunk);
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[20..22], &4u16.to_le_bytes());
        assert_eq!(ModelPortals::load(&bytes).unwrap(), chunk);
    }

    #[test]
    fn trailing_partial_portal_is_dropped() {
        let mut payload = vec![0u8; 20];
        payload.extend_from_slice(&[0xEE; 19]);
        let chunk = ModelPortals::from_bytes(&payload).unwrap();
        assert_eq!(chunk.record_count(), 1);
    }
}
