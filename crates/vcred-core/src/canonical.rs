//! # Canonical Serialization — Deterministic Signing Input
//!
//! This module defines [`CanonicalBytes`], the sole construction path for
//! bytes that are signed by the external signing authority and later
//! re-derived during proof verification.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct
//! `CanonicalBytes` is through [`CanonicalBytes::new()`], which applies the
//! full coercion pipeline before serialization. Verification rebuilds the
//! signing input from the stored credential, so any divergence between the
//! bytes signed at issuance and the bytes rebuilt at verification would make
//! every proof check fail. Funnelling both paths through one constructor
//! makes the "wrong serialization path" class of defects structurally
//! impossible.
//!
//! ## Coercion Rules
//!
//! 1. Reject floats — claim values carrying amounts must be strings or integers.
//! 2. Normalize datetimes to UTC ISO 8601 with `Z` suffix, truncated to seconds.
//! 3. Sort object keys lexicographically.
//! 4. Use compact separators (no whitespace).

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS-compatible canonicalization.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// Applies the full coercion pipeline before serialization. This is the
    /// ONLY way to construct `CanonicalBytes`; both the issuance path (what
    /// gets sent to the signing authority) and the verification path (what
    /// gets checked against the proof) must use it.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value)?;
        let bytes = serde_json::to_vec(&coerced)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The canonical payload as a UTF-8 string.
    ///
    /// The signing authority accepts the payload as a JSON string field, so
    /// the wire form is text. Canonical bytes are always valid UTF-8 because
    /// they come from `serde_json::to_vec`.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values according to the canonicalization rules.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(n) => {
            // Reject pure floats — amounts must be strings or integers.
            if let Some(f) = n.as_f64() {
                if n.is_f64() && !n.is_i64() && !n.is_u64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(Value::Number(n))
        }
        Value::Object(map) => {
            // serde_json::Map is backed by BTreeMap (preserve_order is off),
            // so rebuilding the map yields lexicographically sorted keys.
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::String(s) => {
            // Datetime normalization: if the string parses as RFC 3339,
            // normalize to UTC ISO 8601 with Z suffix, truncated to seconds.
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Ok(Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            } else {
                Ok(Value::String(s))
            }
        }
        // Bool and Null pass through unchanged.
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_output_is_compact_and_sorted() {
        let value = json!({"zeta": 1, "alpha": {"nested": true}, "mid": "x"});
        let canonical = CanonicalBytes::new(&value).unwrap();
        assert_eq!(
            canonical.as_str(),
            r#"{"alpha":{"nested":true},"mid":"x","zeta":1}"#
        );
    }

    #[test]
    fn float_values_are_rejected() {
        let value = json!({"amount": 12.5});
        let err = CanonicalBytes::new(&value).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));
    }

    #[test]
    fn nested_float_is_rejected() {
        let value = json!({"outer": {"list": [1, 2, 3.0]}});
        assert!(CanonicalBytes::new(&value).is_err());
    }

    #[test]
    fn integers_pass_through() {
        let value = json!({"count": 42, "neg": -7});
        let canonical = CanonicalBytes::new(&value).unwrap();
        assert_eq!(canonical.as_str(), r#"{"count":42,"neg":-7}"#);
    }

    #[test]
    fn datetimes_normalize_to_utc_seconds() {
        let value = json!({"at": "2026-01-15T17:30:00.123+05:00"});
        let canonical = CanonicalBytes::new(&value).unwrap();
        assert_eq!(canonical.as_str(), r#"{"at":"2026-01-15T12:30:00Z"}"#);
    }

    #[test]
    fn non_datetime_strings_unchanged() {
        let value = json!({"name": "2026 report"});
        let canonical = CanonicalBytes::new(&value).unwrap();
        assert_eq!(canonical.as_str(), r#"{"name":"2026 report"}"#);
    }

    #[test]
    fn same_value_same_bytes() {
        let a = json!({"b": 2, "a": 1});
        let b = json!({"a": 1, "b": 2});
        assert_eq!(
            CanonicalBytes::new(&a).unwrap(),
            CanonicalBytes::new(&b).unwrap()
        );
    }

    #[test]
    fn as_bytes_matches_as_str() {
        let canonical = CanonicalBytes::new(&json!({"k": "v"})).unwrap();
        assert_eq!(canonical.as_bytes(), canonical.as_str().as_bytes());
    }

    proptest::proptest! {
        #[test]
        fn canonicalization_is_deterministic(
            keys in proptest::collection::vec("[a-z]{1,8}", 1..6),
            vals in proptest::collection::vec(0i64..1000, 1..6),
        ) {
            let mut map = serde_json::Map::new();
            for (k, v) in keys.iter().zip(vals.iter()) {
                map.insert(k.clone(), json!(v));
            }
            let value = Value::Object(map);
            let first = CanonicalBytes::new(&value).unwrap();
            let second = CanonicalBytes::new(&value).unwrap();
            proptest::prop_assert_eq!(first, second);
        }
    }
}
