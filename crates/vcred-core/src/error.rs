//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each variant carries enough diagnostic context for an operator to act on:
//! the invalid input, the expected format, or the operation that failed.

use thiserror::Error;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Claim values carrying amounts must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer for amounts: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// DID does not conform to W3C DID syntax (did:method:identifier).
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors from cryptographic key and signature handling.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key material could not be decoded or has the wrong length.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// A signature value could not be decoded or has the wrong length.
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
}
