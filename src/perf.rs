//! Bulk decoding of sibling chunks.
//!
//! Chunks never share state, so a container's chunks can be decoded
//! independently.  With the `parallel` feature the work is spread over the
//! Rayon global pool; without it the same call runs sequentially.  Either
//! way the output order matches the input order, and any decode error
//! fails the whole batch.

use crate::chunk::{load_chunk_with, Chunk, Signature};
use crate::error::Result;
use crate::framing::DecodeOptions;

/// One undecoded chunk as handed over by a container reader.
pub type RawChunk<'a> = (Signature, &'a [u8]);

/// Decode every chunk with default (lenient) options.
pub fn load_chunks_parallel(chunks: &[RawChunk<'_>]) -> Result<Vec<Box<dyn Chunk>>> {
    load_chunks_parallel_with(chunks, &DecodeOptions::default())
}

/// Decode every chunk with `opts`.  Results come back in input order;
/// the first error encountered is returned.
pub fn load_chunks_parallel_with(
    chunks: &[RawChunk<'_>],
    opts:   &DecodeOptions,
) -> Result<Vec<Box<dyn Chunk>>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        chunks
            .par_iter()
            .map(|&(signature, payload)| load_chunk_with(signature, payload, opts))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        chunks
            .iter()
            .map(|&(signature, payload)| load_chunk_with(signature, payload, opts))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{ModelPortals, ModelTerrainCuttingPlanes, TerrainModelPlacementInfo};
    use crate::error::ChunkError;

    #[test]
    fn preserves_input_order() {
        let planes = [0u8; 48];
        let portals = [0u8; 40];
        let placements = [0u8; 36];
        let input: Vec<RawChunk<'_>> = vec![
            (ModelTerrainCuttingPlanes::SIGNATURE, &planes[..]),
            (ModelPortals::SIGNATURE, &portals[..]),
            (TerrainModelPlacementInfo::SIGNATURE, &placements[..]),
        ];
        let chunks = load_chunks_parallel(&input).unwrap();
        let summary: Vec<_> = chunks.iter().map(|c| (c.signature(), c.record_count())).collect();
        assert_eq!(
            summary,
            vec![
                (ModelTerrainCuttingPlanes::SIGNATURE, 3),
                (ModelPortals::SIGNATURE, 2),
                (TerrainModelPlacementInfo::SIGNATURE, 1),
            ],
        );
    }

    #[test]
    fn surfaces_decode_error() {
        let bad = [0u8; 47];
        let input: Vec<RawChunk<'_>> = vec![
            (ModelPortals::SIGNATURE, &[0u8; 0][..]),
            (ModelTerrainCuttingPlanes::SIGNATURE, &bad[..]),
        ];
        let err = load_chunks_parallel(&input).unwrap_err();
        assert_eq!(err, ChunkError::TruncatedRecord { record_size: 16, remaining: 15 });
    }
}
