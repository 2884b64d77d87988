//! # Signature Verifier Capability
//!
//! The verification engine checks proofs through the [`SignatureVerifier`]
//! trait rather than calling a concrete signature suite. Swapping or adding
//! a suite (or stubbing verification in tests) is an implementation of this
//! trait, not a change to the engine.

use vcred_core::error::CryptoError;
use vcred_core::CanonicalBytes;

use crate::ed25519::{verify_with_public_key, Ed25519PublicKey, Ed25519Signature};

/// Verifies a proof value against resolved key material.
///
/// `Ok(false)` means the signature does not match; `Err` means the proof
/// value or key material could not even be decoded. Callers treat both as
/// a failed proof check, but the distinction matters for diagnostics.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `proof_value` (hex-encoded signature) over the canonical
    /// payload with the given public key.
    fn verify(
        &self,
        payload: &CanonicalBytes,
        proof_value: &str,
        public_key: &Ed25519PublicKey,
    ) -> Result<bool, CryptoError>;
}

/// Ed25519 implementation of the verifier capability.
///
/// Expects `proof_value` to be a 128-character hex string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        payload: &CanonicalBytes,
        proof_value: &str,
        public_key: &Ed25519PublicKey,
    ) -> Result<bool, CryptoError> {
        let signature = Ed25519Signature::from_hex(proof_value)?;
        verify_with_public_key(payload, &signature, public_key)
    }
}
