//! # DID Document types
//!
//! The wire shape returned by the external DID resolver. Only the fields
//! the verification engine needs are modeled; resolvers may return more,
//! so unknown fields are ignored here (unlike the rigid credential
//! envelope).

use serde::{Deserialize, Serialize};

use vcred_core::error::CryptoError;
use vcred_crypto::Ed25519PublicKey;

/// A resolved DID document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidDocument {
    /// JSON-LD context, when the resolver includes one.
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    /// The DID this document describes.
    pub id: String,

    /// Verification methods (keys) bound to this DID.
    #[serde(rename = "verificationMethod", default)]
    pub verification_method: Vec<VerificationMethod>,

    /// DID URLs of methods usable for assertion proofs.
    #[serde(rename = "assertionMethod", default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<String>,
}

impl DidDocument {
    /// Select the verification method a proof names, falling back to the
    /// first method in the document.
    ///
    /// Proofs issued by this registry name the issuer DID itself as the
    /// verification method, so the fallback is the common path.
    pub fn method_for(&self, verification_method: &str) -> Option<&VerificationMethod> {
        self.verification_method
            .iter()
            .find(|m| m.id == verification_method)
            .or_else(|| self.verification_method.first())
    }
}

/// A single verification method entry in a DID document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// DID URL of this key.
    pub id: String,

    /// Key type, e.g. `Ed25519VerificationKey2020`.
    #[serde(rename = "type")]
    pub method_type: String,

    /// DID of the controller of this key.
    pub controller: String,

    /// Hex-encoded Ed25519 public key (64 hex chars).
    #[serde(rename = "publicKeyHex")]
    pub public_key_hex: String,
}

impl VerificationMethod {
    /// Decode the key material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] when `publicKeyHex` is not a
    /// valid 32-byte hex encoding.
    pub fn public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        Ed25519PublicKey::from_hex(&self.public_key_hex)
    }
}
