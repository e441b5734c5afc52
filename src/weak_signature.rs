//! Weak package signature: the `(signature)` member of an archive.
//!
//! Not a tagged chunk: the archive stores it as a named file, so its
//! identity is [`INTERNAL_FILENAME`].  The layout is fixed at 72 bytes:
//!
//! ```text
//! [ identifier: u64 = 0 (8 B) | signature (64 B) ]
//! ```
//!
//! Verifying the signature against archive contents is out of scope.

use std::fmt;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{ChunkError, Result};
use crate::primitives::{encode_fixed, ByteReader};

pub const INTERNAL_FILENAME: &str = "(signature)";

/// Total encoded size.
pub const WEAK_SIGNATURE_SIZE: usize = 72;
/// Length of the opaque signature payload.
pub const SIGNATURE_LEN: usize = 64;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeakPackageSignature {
    #[serde(with = "signature_bytes")]
    signature: [u8; SIGNATURE_LEN],
}

impl WeakPackageSignature {
    pub const INTERNAL_FILENAME: &'static str = INTERNAL_FILENAME;

    /// Wrap a 64-byte signature; the identifier is always written as zero.
    pub fn new(signature: [u8; SIGNATURE_LEN]) -> Self {
        Self { signature }
    }

    /// Parse a complete `(signature)` member.
    ///
    /// The length is checked before anything is read; a non-zero identifier
    /// is rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != WEAK_SIGNATURE_SIZE {
            return Err(ChunkError::InvalidLength {
                expected: WEAK_SIGNATURE_SIZE,
                actual:   data.len(),
            });
        }
        let mut r = ByteReader::new(data);
        let identifier = r.read_u64()?;
        if identifier != 0 {
            return Err(ChunkError::InvalidFixedField {
                field:    "identifier",
                expected: 0,
                actual:   identifier,
            });
        }
        Ok(Self { signature: r.read_array::<SIGNATURE_LEN>()? })
    }

    /// Encode the full 72-byte member, zero identifier first.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_fixed::<WEAK_SIGNATURE_SIZE>(|w| {
            w.write_u64::<LittleEndian>(0)?;
            w.write_all(&self.signature)
        })
        .to_vec()
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature
    }

    /// Lower-case hex of the signature bytes.
    pub fn signature_hex(&self) -> String {
        hex::encode(self.signature)
    }
}

impl fmt::Debug for WeakPackageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakPackageSignature")
            .field("signature", &self.signature_hex())
            .finish()
    }
}

impl TryFrom<&[u8]> for WeakPackageSignature {
    type Error = ChunkError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::from_bytes(data)
    }
}

// serde only derives array impls up to 32 elements.
mod signature_bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SIGNATURE_LEN;

    pub fn serialize<S: Serializer>(bytes: &[u8; SIGNATURE_LEN], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; SIGNATURE_LEN], D::Error> {
        let text = String::deserialize(d)?;
        let mut out = [0u8; SIGNATURE_LEN];
        hex::decode_to_slice(&text, &mut out).map_err(D::Error::custom)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conforming() -> Vec<u8> {
        let mut data = vec![0u8; 8];
        data.extend((0..64u8).map(|i| i.wrapping_mul(3)));
        data
    }

    #[test]
    fn parses_conforming_block() {
        let data = conforming();
        let sig = WeakPackageSignature::from_bytes(&data).unwrap();
        assert_eq!(&sig.signature()[..], &data[8..]);
        assert_eq!(sig.to_bytes(), data);
    }

    #[test]
    fn rejects_nonzero_identifier() {
        let mut data = conforming();
        data[3] = 1;
        let err = WeakPackageSignature::from_bytes(&data).unwrap_err();
        assert_eq!(
            err,
            ChunkError::InvalidFixedField { field: "identifier", expected: 0, actual: 1 << 24 },
        );
    }

    #[test]
    fn rejects_wrong_length() {
        for len in [0usize, 71, 73] {
            let err = WeakPackageSignature::from_bytes(&vec![0u8; len]).unwrap_err();
            assert_eq!(err, ChunkError::InvalidLength { expected: 72, actual: len });
        }
    }

    #[test]
    fn hex_rendering() {
        let sig = WeakPackageSignature::new([0xAB; SIGNATURE_LEN]);
        assert_eq!(sig.signature_hex(), "ab".repeat(64));
        assert_eq!(WeakPackageSignature::INTERNAL_FILENAME, "(signature)");
    }
}
