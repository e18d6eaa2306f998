//! Observation buffers and content hashing
//!
//! Landmarks are identified by index; the digest computed here exists only
//! to spot duplicate observations and to label landmarks in debug output.

use std::fmt;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::TopoMapError;

/// Observation payload stored on every landmark
pub type Observation = ArrayD<f32>;

/// Element types that have a canonical little-endian byte encoding
pub trait CanonicalBytes: Copy {
    fn write_le(&self, out: &mut Vec<u8>);
}

macro_rules! impl_canonical_bytes {
    ($($t:ty),*) => {
        $(
            impl CanonicalBytes for $t {
                fn write_le(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_canonical_bytes!(u8, i32, i64, f32, f64);

/// SHA-256 digest of an observation's contents
///
/// Always 64 lowercase hex characters; deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObservationDigest(String);

impl ObservationDigest {
    /// Number of hex characters in a full digest
    pub const LEN: usize = 64;

    /// Number of hex characters shown by `short()`
    pub const SHORT_LEN: usize = 8;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for logs and graph labels
    pub fn short(&self) -> &str {
        self.0.get(..Self::SHORT_LEN).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for ObservationDigest {
    type Error = TopoMapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let well_formed = value.len() == Self::LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(TopoMapError::invalid_value("observation hash", value));
        }
        Ok(Self(value))
    }
}

impl From<ObservationDigest> for String {
    fn from(digest: ObservationDigest) -> Self {
        digest.0
    }
}

impl fmt::Display for ObservationDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash an observation buffer.
///
/// Elements are visited in logical row-major order regardless of the
/// underlying memory layout, so a transposed or sliced view hashes the same
/// as its standard-layout copy.
pub fn hash_observation<S, D>(observation: &ArrayBase<S, D>) -> ObservationDigest
where
    S: Data,
    S::Elem: CanonicalBytes,
    D: Dimension,
{
    let mut bytes = Vec::with_capacity(observation.len() * std::mem::size_of::<S::Elem>());
    match observation.as_slice() {
        Some(contiguous) => {
            for value in contiguous {
                value.write_le(&mut bytes);
            }
        }
        None => {
            for value in observation.iter() {
                value.write_le(&mut bytes);
            }
        }
    }

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    ObservationDigest(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, s, Array2, Array3};

    #[test]
    fn test_identical_buffers_hash_equal() {
        let a = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let b = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        assert_eq!(hash_observation(&a), hash_observation(&b));
    }

    #[test]
    fn test_different_buffers_hash_differently() {
        let a = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let b = arr2(&[[1.0f32, 2.0], [3.0, 5.0]]);
        assert_ne!(hash_observation(&a), hash_observation(&b));
    }

    #[test]
    fn test_transposed_view_matches_standard_layout() {
        let base = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f32);
        let transposed = base.t();
        assert!(transposed.as_slice().is_none());

        let owned = transposed.as_standard_layout().into_owned();
        assert!(owned.as_slice().is_some());

        assert_eq!(hash_observation(&transposed), hash_observation(&owned));
    }

    #[test]
    fn test_strided_slice_matches_copy() {
        let base = Array3::from_shape_fn((4, 4, 3), |(i, j, k)| (i * 100 + j * 10 + k) as u8);
        let strided = base.slice(s![..;2, .., 1]);
        let copy = strided.to_owned();
        assert_eq!(hash_observation(&strided), hash_observation(&copy));
    }

    #[test]
    fn test_digest_format() {
        let obs = Observation::zeros(ndarray::IxDyn(&[2, 2]));
        let digest = hash_observation(&obs);
        assert_eq!(digest.as_str().len(), 64);
        assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest.short().len(), ObservationDigest::SHORT_LEN);
    }

    #[test]
    fn test_digest_parse_rejects_malformed() {
        let valid = hash_observation(&Observation::zeros(ndarray::IxDyn(&[3])));
        let parsed = ObservationDigest::try_from(valid.as_str().to_string()).unwrap();
        assert_eq!(parsed, valid);

        for bad in ["", "abc", "a\u{e9}\u{e9}\u{e9}\u{e9}"] {
            let err = ObservationDigest::try_from(bad.to_string()).unwrap_err();
            assert!(matches!(err, TopoMapError::InvalidValue { .. }));
        }
        let upper = valid.as_str().to_ascii_uppercase();
        assert!(ObservationDigest::try_from(upper).is_err());

        let multibyte = "\u{e9}".repeat(ObservationDigest::LEN / 2);
        assert_eq!(multibyte.len(), ObservationDigest::LEN);
        assert!(ObservationDigest::try_from(multibyte).is_err());
    }

    #[test]
    fn test_digest_deserialize_validates() {
        let valid = hash_observation(&Observation::zeros(ndarray::IxDyn(&[2])));
        let json = serde_json::to_string(&valid).unwrap();
        assert_eq!(json, format!("\"{}\"", valid.as_str()));
        let back: ObservationDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, valid);

        assert!(serde_json::from_str::<ObservationDigest>("\"a\u{e9}\u{e9}\u{e9}\u{e9}\"").is_err());
    }

    #[test]
    fn test_short_on_short_digest() {
        let digest = ObservationDigest("ab".to_string());
        assert_eq!(digest.short(), "ab");
    }
}
