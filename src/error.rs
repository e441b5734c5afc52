//! Error taxonomy shared by every decode path.
//!
//! Decoding is fail-fast: the first malformed field aborts the whole chunk
//! and the caller receives one of these variants.  Nothing is substituted
//! with a default value.

use thiserror::Error;

use crate::chunk::Signature;

pub type Result<T> = std::result::Result<T, ChunkError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// Fewer bytes remain than a primitive or record needs.
    #[error("Insufficient data: needed {needed} bytes, {available} available")]
    InsufficientData { needed: usize, available: usize },

    /// A collection payload is not a whole number of records.
    #[error("Truncated record: record size is {record_size} bytes but only {remaining} remain")]
    TruncatedRecord { record_size: usize, remaining: usize },

    /// A field with a mandated constant value holds something else.
    #[error("Invalid fixed field `{field}`: expected {expected}, found {actual}")]
    InvalidFixedField { field: &'static str, expected: u64, actual: u64 },

    /// Payload length differs from a format-mandated exact size.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// No chunk kind is registered for this tag.
    #[error("Unknown chunk signature {0}")]
    UnknownSignature(Signature),

    /// The chunk kind is read-only and has no serializer.
    #[error("Chunk {0} does not support serialization")]
    NotWritable(Signature),
}

impl ChunkError {
    /// True for the variants a malformed payload produces, as opposed to
    /// caller errors such as an unknown tag.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, ChunkError::UnknownSignature(_) | ChunkError::NotWritable(_))
    }
}
