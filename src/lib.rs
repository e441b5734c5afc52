//! Tagged binary chunk codec for game-asset container files.
//!
//! Layers, leaf to root: [`primitives`] → [`record`] → [`framing`] → [`chunk`].
//! A container reader hands a payload slice plus its tag to [`load_chunk`];
//! writing reverses the path through [`WritableChunk::serialize`].

pub mod error;
pub mod primitives;
pub mod record;
pub mod framing;
pub mod chunk;
pub mod weak_signature;
pub mod perf;

pub use error::{ChunkError, Result};
pub use primitives::{Plane, Rotator, Vector3};
pub use record::{ModelPlacementEntry, ModelPlacementFlags, Portal, Record, WritableRecord};
pub use framing::{decode_fixed_count, decode_until_exhausted, DecodeOptions, Strictness};
pub use chunk::{
    load_chunk, load_chunk_with, serialize_chunk, Chunk, ModelPortals, ModelTerrainCuttingPlanes,
    Signature, TerrainModelPlacementInfo, WritableChunk,
};
pub use weak_signature::WeakPackageSignature;
