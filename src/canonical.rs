//! Canonical serialization for graph and config fingerprints.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap in hashed data: use ordered collections
//! - f64 serializes through serde_json's shortest round-trip form
//!
//! Serialization failures are returned, never hashed as empty input.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes.
///
/// Fails for values JSON cannot represent, such as maps with non-string keys.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// xxh64 (seed 0) of the canonical bytes of `value`.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<u64, serde_json::Error> {
    to_canonical_bytes(value).map(|bytes| xxh64(&bytes, 0))
}

/// [`canonical_hash`] as 16 lowercase hex digits.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    canonical_hash(value).map(|hash| format!("{hash:016x}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Reading {
        text: String,
        level: usize,
    }

    #[test]
    fn test_determinism() {
        let r = Reading {
            text: "fox".to_string(),
            level: 2,
        };

        assert_eq!(canonical_hash(&r).unwrap(), canonical_hash(&r).unwrap());
        assert_eq!(canonical_hash_hex(&r).unwrap().len(), 16);
    }

    #[test]
    fn test_field_values_change_hash() {
        let a = Reading { text: "fox".to_string(), level: 2 };
        let b = Reading { text: "fox".to_string(), level: 3 };
        assert_ne!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }

    #[test]
    fn test_unrepresentable_value_is_an_error() {
        let mut by_pair: BTreeMap<(u64, u64), usize> = BTreeMap::new();
        by_pair.insert((1, 2), 3);

        assert!(to_canonical_bytes(&by_pair).is_err());
        assert!(canonical_hash_hex(&by_pair).is_err());
    }
}
