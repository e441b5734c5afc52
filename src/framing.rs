//! Chunk framing: finding record boundaries inside a payload.
//!
//! Two population strategies are in use across the format family:
//!
//! | Strategy       | Count source                   | Trailing bytes            |
//! |----------------|--------------------------------|---------------------------|
//! | fixed count    | `len / record_size`            | ignored (lenient) or error (strict) |
//! | until exhausted| cursor advances to payload end | always `TruncatedRecord`  |
//!
//! The window functions never look inside a record.  The `*_records`
//! helpers pair a window strategy with [`Record::decode`] and collect the
//! result; a failure anywhere discards everything decoded so far.
//!
//! Encoding is plain concatenation.  No padding and no length prefix are
//! written here; an outer length belongs to the container.

use std::slice::ChunksExact;

use tracing::{debug, warn};

use crate::error::{ChunkError, Result};
use crate::record::{Record, WritableRecord};

// ── DecodeOptions ─────────────────────────────────────────────────────────────

/// How fixed-count framing treats a payload that is not a whole number of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop the trailing remainder.  Matches the reference readers.
    #[default]
    Lenient,
    /// Reject the payload with [`ChunkError::TruncatedRecord`].
    Strict,
}

/// Decode-time configuration passed down to the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub strictness: Strictness,
}

impl DecodeOptions {
    /// Reject payloads that end in a partial record.
    pub const fn strict() -> Self {
        Self { strictness: Strictness::Strict }
    }

    /// Drop a trailing partial record.  Same as `Default`.
    pub const fn lenient() -> Self {
        Self { strictness: Strictness::Lenient }
    }
}

// ── Fixed count ───────────────────────────────────────────────────────────────

/// Split `payload` into `len / record_size` windows of `record_size` bytes.
/// Trailing bytes that do not fill a whole window are skipped.
///
/// # Panics
/// If `record_size` is zero.
pub fn decode_fixed_count(payload: &[u8], record_size: usize) -> ChunksExact<'_, u8> {
    payload.chunks_exact(record_size)
}

/// [`decode_fixed_count`] with the remainder policy taken from `opts`.
pub fn decode_fixed_count_with<'a>(
    payload:     &'a [u8],
    record_size: usize,
    opts:        &DecodeOptions,
) -> Result<ChunksExact<'a, u8>> {
    let windows = decode_fixed_count(payload, record_size);
    let remaining = windows.remainder().len();
    if remaining != 0 {
        match opts.strictness {
            Strictness::Strict => {
                debug!(len = payload.len(), record_size, remaining, "rejecting non-multiple payload");
                return Err(ChunkError::TruncatedRecord { record_size, remaining });
            }
            Strictness::Lenient => {
                warn!(len = payload.len(), record_size, remaining, "ignoring trailing bytes after last whole record");
            }
        }
    }
    Ok(windows)
}

// ── Until exhausted ───────────────────────────────────────────────────────────

/// Iterator behind [`decode_until_exhausted`].
///
/// Yields one window per step; if a step finds fewer than `record_size`
/// bytes left it yields `TruncatedRecord` once and then stops.
#[derive(Debug, Clone)]
pub struct ExhaustiveWindows<'a> {
    payload:     &'a [u8],
    record_size: usize,
    cursor:      usize,
}

impl<'a> Iterator for ExhaustiveWindows<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.payload.len() {
            return None;
        }
        let remaining = self.payload.len() - self.cursor;
        if remaining < self.record_size {
            self.cursor = self.payload.len();
            return Some(Err(ChunkError::TruncatedRecord {
                record_size: self.record_size,
                remaining,
            }));
        }
        let window = &self.payload[self.cursor..self.cursor + self.record_size];
        self.cursor += self.record_size;
        Some(Ok(window))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.payload.len() - self.cursor;
        let n = left.div_ceil(self.record_size);
        (n, Some(n))
    }
}

/// Walk `payload` in `record_size` steps until the cursor reaches the end.
///
/// # Panics
/// If `record_size` is zero.
pub fn decode_until_exhausted(payload: &[u8], record_size: usize) -> ExhaustiveWindows<'_> {
    assert!(record_size != 0, "record size must be non-zero");
    ExhaustiveWindows { payload, record_size, cursor: 0 }
}

// ── Typed helpers ─────────────────────────────────────────────────────────────

/// Decode every whole `R` in `payload`, remainder handled per `opts`.
pub fn decode_records_fixed_count<R: Record>(payload: &[u8], opts: &DecodeOptions) -> Result<Vec<R>> {
    decode_fixed_count_with(payload, R::SIZE, opts)?
        .map(R::decode)
        .collect()
}

/// Decode `R`s back to back until `payload` is consumed.  Fails with
/// `TruncatedRecord` unless the length is a multiple of `R::SIZE`.
pub fn decode_records_until_exhausted<R: Record>(payload: &[u8]) -> Result<Vec<R>> {
    let records: Result<Vec<R>> = decode_until_exhausted(payload, R::SIZE)
        .map(|window| window.and_then(R::decode))
        .collect();
    if let Err(ref e) = records {
        debug!(len = payload.len(), record_size = R::SIZE, error = %e, "exhaustive framing failed");
    }
    records
}

/// Concatenate each record's encoding in order.
pub fn encode_records<R: WritableRecord>(records: &[R]) -> Vec<u8> {
    let mut out = Vec::with_capacity(records.len() * R::SIZE);
    for record in records {
        record.encode_into(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Plane, Vector3};

    #[test]
    fn fixed_count_skips_remainder() {
        let payload: Vec<u8> = (0u8..23).collect();
        let windows: Vec<&[u8]> = decode_fixed_count(&payload, 5).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], &[0, 1, 2, 3, 4]);
        assert_eq!(windows[3], &[15, 16, 17, 18, 19]);
    }

    #[test]
    fn fixed_count_strict_rejects_remainder() {
        let payload = [0u8; 23];
        let err = decode_fixed_count_with(&payload, 5, &DecodeOptions::strict()).unwrap_err();
        assert_eq!(err, ChunkError::TruncatedRecord { record_size: 5, remaining: 3 });
        assert_eq!(decode_fixed_count_with(&payload, 5, &DecodeOptions::lenient()).unwrap().len(), 4);
        assert_eq!(decode_fixed_count_with(&payload[..20], 5, &DecodeOptions::strict()).unwrap().len(), 4);
    }

    #[test]
    fn exhausted_walks_exact_multiple() {
        let payload: Vec<u8> = (0u8..12).collect();
        let windows: Vec<&[u8]> = decode_until_exhausted(&payload, 4)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(windows, vec![&payload[0..4], &payload[4..8], &payload[8..12]]);
    }

    #[test]
    fn exhausted_fails_on_short_tail_then_stops() {
        let payload = [0u8; 10];
        let mut it = decode_until_exhausted(&payload, 4);
        assert!(it.next().unwrap().is_ok());
        assert!(it.next().unwrap().is_ok());
        assert_eq!(
            it.next().unwrap().unwrap_err(),
            ChunkError::TruncatedRecord { record_size: 4, remaining: 2 },
        );
        assert!(it.next().is_none());
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert_eq!(decode_fixed_count(&[], 20).count(), 0);
        assert_eq!(decode_until_exhausted(&[], 16).count(), 0);
        assert!(decode_records_until_exhausted::<Plane>(&[]).unwrap().is_empty());
        assert!(encode_records::<Plane>(&[]).is_empty());
    }

    #[test]
    fn typed_helpers_preserve_order() {
        let planes = vec![
            Plane::new(Vector3::new(1.0, 0.0, 0.0), 1.0),
            Plane::new(Vector3::new(0.0, 1.0, 0.0), 2.0),
        ];
        let bytes = encode_records(&planes);
        assert_eq!(bytes.len(), 32);
        assert_eq!(decode_records_until_exhausted::<Plane>(&bytes).unwrap(), planes);
        assert_eq!(
            decode_records_fixed_count::<Plane>(&bytes, &DecodeOptions::default()).unwrap(),
            planes,
        );
    }

    #[test]
    #[should_panic]
    fn zero_record_size_panics() {
        let _ = decode_until_exhausted(&[1, 2, 3], 0);
    }
}
