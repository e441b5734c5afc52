//! Chunk type contract and signature dispatch.
//!
//! # Identity rules
//! Every chunk kind is identified by a 4-byte ASCII tag, fixed per type and
//! never derived from instance data.  Tags are case-sensitive and are not
//! null-terminated on disk.
//!
//! # Capabilities
//! All chunk kinds can be loaded.  Only some can be written back; callers
//! holding a `dyn Chunk` ask [`Chunk::as_writable`] instead of inspecting
//! the concrete type.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChunkError, Result};
use crate::framing::DecodeOptions;

pub mod cutting_planes;
pub mod placement;
pub mod portals;

pub use cutting_planes::ModelTerrainCuttingPlanes;
pub use placement::TerrainModelPlacementInfo;
pub use portals::ModelPortals;

// ── Signature ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature(pub [u8; 4]);

impl Signature {
    pub const fn new(tag: [u8; 4]) -> Self {
        Self(tag)
    }

    /// The four tag bytes in file order.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Parse a tag from text.  Returns `None` unless `s` is exactly 4 ASCII bytes.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let bytes: [u8; 4] = s.as_bytes().try_into().ok()?;
        bytes.is_ascii().then_some(Self(bytes))
    }
}

impl From<[u8; 4]> for Signature {
    fn from(tag: [u8; 4]) -> Self {
        Self(tag)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(\"{self}\")")
    }
}

// ── Chunk traits ──────────────────────────────────────────────────────────────

pub trait Chunk: Send + Sync + fmt::Debug {
    /// The tag of this chunk kind.  Identical for every instance.
    fn signature(&self) -> Signature;

    /// Number of records currently held.
    fn record_count(&self) -> usize;

    /// Decode a payload.  Either every record is decoded or an error is
    /// returned; a partially filled chunk is never observable.
    fn load_with(payload: &[u8], opts: &DecodeOptions) -> Result<Self>
    where
        Self: Sized;

    fn load(payload: &[u8]) -> Result<Self>
    where
        Self: Sized,
    {
        Self::load_with(payload, &DecodeOptions::default())
    }

    /// Write capability, if this kind has one.
    fn as_writable(&self) -> Option<&dyn WritableChunk> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

pub trait WritableChunk: Chunk {
    /// Payload bytes, without the tag or any length prefix.
    fn serialize(&self) -> Vec<u8>;
}

/// Serialize through the dynamic contract, failing for read-only kinds.
pub fn serialize_chunk(chunk: &dyn Chunk) -> Result<Vec<u8>> {
    chunk
        .as_writable()
        .map(|writable| writable.serialize())
        .ok_or_else(|| ChunkError::NotWritable(chunk.signature()))
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Tags this build knows how to load.
pub const KNOWN_SIGNATURES: [Signature; 3] = [
    TerrainModelPlacementInfo::SIGNATURE,
    ModelTerrainCuttingPlanes::SIGNATURE,
    ModelPortals::SIGNATURE,
];

/// True if [`load_chunk`] has a decoder for `signature`.
pub fn is_known_signature(signature: Signature) -> bool {
    KNOWN_SIGNATURES.contains(&signature)
}

/// Decode `payload` as the chunk kind named by `signature`.
pub fn load_chunk(signature: Signature, payload: &[u8]) -> Result<Box<dyn Chunk>> {
    load_chunk_with(signature, payload, &DecodeOptions::default())
}

/// [`load_chunk`] with explicit decode options.  Unknown tags fail with
/// [`ChunkError::UnknownSignature`].
pub fn load_chunk_with(
    signature: Signature,
    payload:   &[u8],
    opts:      &DecodeOptions,
) -> Result<Box<dyn Chunk>> {
    trace!(%signature, len = payload.len(), "loading chunk");
    match signature {
        TerrainModelPlacementInfo::SIGNATURE => {
            Ok(Box::new(TerrainModelPlacementInfo::load_with(payload, opts)?))
        }
        ModelTerrainCuttingPlanes::SIGNATURE => {
            Ok(Box::new(ModelTerrainCuttingPlanes::load_with(payload, opts)?))
        }
        ModelPortals::SIGNATURE => Ok(Box::new(ModelPortals::load_with(payload, opts)?)),
        other => {
            debug!(signature = %other, "no chunk kind registered for tag");
            Err(ChunkError::UnknownSignature(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_display() {
        assert_eq!(Signature(*b"MOPT").to_string(), "MOPT");
        assert_eq!(Signature([b'M', 0, b'X', 0xFF]).to_string(), "M\\x00X\\xff");
        assert_eq!(format!("{:?}", Signature(*b"MMDF")), "Signature(\"MMDF\")");
    }

    #[test]
    fn signature_from_text() {
        assert_eq!(Signature::from_str_tag("MOPL"), Some(ModelTerrainCuttingPlanes::SIGNATURE));
        assert_eq!(Signature::from_str_tag("MOP"), None);
        assert_eq!(Signature::from_str_tag("MOPLX"), None);
        assert_ne!(Signature::from_str_tag("mopl"), Some(ModelTerrainCuttingPlanes::SIGNATURE));
    }

    #[test]
    fn unknown_signature_is_rejected() {
        let err = load_chunk(Signature(*b"MVER"), &[0u8; 4]).unwrap_err();
        assert_eq!(err, ChunkError::UnknownSignature(Signature(*b"MVER")));
        assert!(!err.is_data_error());
        assert!(!is_known_signature(Signature(*b"MVER")));
    }

    #[test]
    fn factory_dispatches_by_tag() {
        for sig in KNOWN_SIGNATURES {
            let chunk = load_chunk(sig, &[]).unwrap();
            assert_eq!(chunk.signature(), sig);
            assert_eq!(chunk.record_count(), 0);
        }
    }

    #[derive(Debug)]
    struct ReadOnly;

    impl Chunk for ReadOnly {
        fn signature(&self) -> Signature { Signature(*b"TEST") }
        fn record_count(&self) -> usize { 0 }
        fn load_with(_: &[u8], _: &DecodeOptions) -> Result<Self> { Ok(ReadOnly) }
        fn as_any(&self) -> &dyn Any { self }
    }

    #[test]
    fn read_only_kind_has_no_serializer() {
        let chunk = ReadOnly::load(&[]).unwrap();
        assert!(chunk.as_writable().is_none());
        assert_eq!(
            serialize_chunk(&chunk).unwrap_err(),
            ChunkError::NotWritable(Signature(*b"TEST")),
        );
    }
}
